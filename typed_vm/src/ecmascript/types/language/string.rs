// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::borrow::Cow;

use wtf8::{Wtf8, Wtf8Buf};

use super::Value;
use crate::{ecmascript::execution::Agent, heap::indexes::StringIndex};

#[derive(Debug, Clone)]
pub struct StringHeapData {
    pub(crate) data: Wtf8Buf,
}

impl StringHeapData {
    pub(crate) fn from_str(str: &str) -> Self {
        Self {
            data: Wtf8Buf::from_str(str),
        }
    }
}

/// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
///
/// Strings are interned on creation, so two handles are equal exactly when
/// the strings they refer to are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct String(StringIndex);

impl From<StringIndex> for String {
    fn from(value: StringIndex) -> Self {
        String(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl TryFrom<Value> for String {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(()),
        }
    }
}

impl String {
    pub fn from_str(agent: &mut Agent, str: &str) -> String {
        agent.heap.create_string(str)
    }

    pub fn from_string(agent: &mut Agent, string: std::string::String) -> String {
        agent.heap.create_string(&string)
    }

    pub(crate) fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub fn as_wtf8(self, agent: &Agent) -> &Wtf8 {
        &agent.heap.strings[self.get_index()].data
    }

    /// The string as UTF-8, if it contains no lone surrogates.
    pub fn as_str(self, agent: &Agent) -> Option<&str> {
        self.as_wtf8(agent).as_str()
    }

    pub fn to_string_lossy(self, agent: &Agent) -> Cow<'_, str> {
        self.as_wtf8(agent).to_string_lossy()
    }

    pub fn is_empty(self, agent: &Agent) -> bool {
        self.as_wtf8(agent).len() == 0
    }

    pub fn into_value(self) -> Value {
        self.into()
    }
}
