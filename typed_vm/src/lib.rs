// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ArrayBuffer and TypedArray runtime core.
//!
//! The crate models the byte buffer and typed view family of an
//! ECMAScript engine on top of a small handle-based heap. Everything is
//! driven through an [`Agent`](ecmascript::execution::Agent):
//!
//! ```
//! use typed_vm::ecmascript::{
//!     abstract_operations::operations_on_objects::{construct, get},
//!     builtins::ArgumentsList,
//!     execution::{Agent, Options},
//!     types::{PropertyKey, Value},
//! };
//!
//! let mut agent = Agent::new(Options::default());
//! let array_buffer = agent.current_realm().intrinsics().array_buffer();
//! let buffer = construct(
//!     &mut agent,
//!     array_buffer,
//!     Some(ArgumentsList(&[Value::from(8)])),
//!     None,
//! )
//! .unwrap();
//! let key = PropertyKey::from_str(&mut agent, "byteLength");
//! assert_eq!(get(&mut agent, buffer, key).unwrap(), Value::from(8));
//! ```

pub mod ecmascript;
pub mod heap;

pub use ecmascript::execution::{Agent, JsError, JsResult, Options};
