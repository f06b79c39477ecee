// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)

use tracing::debug;

use super::{Intrinsics, Realm};
use crate::{
    ecmascript::{
        builtins::error::Error,
        types::{String, Value},
    },
    heap::Heap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Largest byte length an ArrayBuffer may be created with. Requests
    /// above it throw a RangeError.
    pub max_array_buffer_byte_length: u64,
    /// Log heap statistics once the realm is set up.
    pub print_internals: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_array_buffer_byte_length: u32::MAX as u64,
            print_internals: false,
        }
    }
}

pub type JsResult<T> = std::result::Result<T, JsError>;

/// A thrown language value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsError(Value);

impl JsError {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(self) -> Value {
        self.0
    }

    /// The kind of the thrown Error object, or `None` if a non-Error value
    /// was thrown.
    pub fn kind(self, agent: &Agent) -> Option<ExceptionType> {
        match self.0 {
            Value::Error(error) => Some(agent[error].kind),
            _ => None,
        }
    }

    pub fn message(self, agent: &Agent) -> Option<&str> {
        match self.0 {
            Value::Error(error) => agent[error].message.as_str(agent),
            _ => None,
        }
    }
}

/// ### [20.5.5 Native Error Types Used in This Standard](https://tc39.es/ecma262/#sec-native-error-types-used-in-this-standard)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionType {
    Error,
    RangeError,
    TypeError,
}

/// ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)
#[derive(Debug)]
pub struct Agent {
    pub(crate) heap: Heap,
    pub(crate) options: Options,
    realm: Realm,
}

impl Agent {
    /// Creates an agent with its heap and a fully initialized default realm.
    pub fn new(options: Options) -> Self {
        let mut heap = Heap::new();
        let realm = Realm::new(&mut heap);
        let mut agent = Self {
            heap,
            options,
            realm,
        };
        Intrinsics::initialize(&mut agent);
        if agent.options.print_internals {
            let statistics = agent.heap.statistics();
            debug!(?statistics, "initialized default realm");
        }
        agent
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn current_realm(&self) -> &Realm {
        &self.realm
    }

    /// Creates an Error object of the given kind and returns it as a thrown
    /// value.
    pub(crate) fn throw_exception_with_static_message(
        &mut self,
        kind: ExceptionType,
        message: &'static str,
    ) -> JsError {
        debug!(?kind, message, "throwing exception");
        let message = String::from_str(self, message);
        let error = Error::create(self, kind, message);
        JsError::new(error.into_value())
    }
}
