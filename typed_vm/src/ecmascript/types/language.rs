// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod object;
mod string;
mod value;

pub(crate) use object::{
    ObjectHeapData, PropertyEntry, parse_string_to_integer_property_key,
};
pub use object::{InternalMethods, InternalSlots, Object, OrdinaryObject, PropertyKey};
pub use string::String;
pub(crate) use string::StringHeapData;
pub(crate) use value::MAX_SAFE_INTEGER;
pub use value::Value;
