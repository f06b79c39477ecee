// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod language;
mod spec;

pub use language::{
    InternalMethods, InternalSlots, Object, OrdinaryObject, PropertyKey, String, Value,
};
pub(crate) use language::{
    MAX_SAFE_INTEGER, ObjectHeapData, PropertyEntry, StringHeapData,
    parse_string_to_integer_property_key,
};
pub(crate) use spec::create_byte_data_block;
pub use spec::{DataBlock, PropertyDescriptor, U8Clamped, Viewable};
