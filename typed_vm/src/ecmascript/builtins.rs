// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [10 Ordinary and Exotic Objects Behaviours](https://tc39.es/ecma262/#sec-ordinary-and-exotic-objects-behaviours)
//!
//! The objects of the buffer and view family, together with the few
//! ordinary builtins they lean on.

pub mod array;
pub mod array_buffer;
pub mod builtin_function;
pub mod error;
pub(crate) mod fundamental_objects;
pub(crate) mod indexed_collections;
pub mod ordinary;
pub(crate) mod structured_data;
pub mod typed_array;

pub use array::Array;
pub(crate) use array_buffer::ArrayBufferHeapData;
pub use array_buffer::ArrayBuffer;
pub use builtin_function::{
    ArgumentsList, Behaviour, Builtin, BuiltinFunction, BuiltinFunctionArgs, BuiltinGetter,
    create_builtin_function,
};
pub use error::Error;
pub use typed_array::{TypedArray, TypedArrayKind};
