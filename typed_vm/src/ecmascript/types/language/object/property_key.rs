// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    execution::Agent,
    types::{String, language::value::MAX_SAFE_INTEGER},
};

/// # [Property key](https://tc39.es/ecma262/#property-key)
///
/// The properties of an object are uniquely identified using property keys.
/// Strings that are the canonical form of an integer in the safe integer
/// range are always stored as [`PropertyKey::Integer`], so a key has exactly
/// one representation.
///
/// An _array index_ is an integer key in the inclusive interval from `0` to
/// `2**32 - 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Integer(i64),
    String(String),
}

/// Parses `str` as a key integer if it is the canonical string form of one.
pub(crate) fn parse_string_to_integer_property_key(str: &str) -> Option<i64> {
    let digits = str.strip_prefix('-').unwrap_or(str);
    let negative = digits.len() != str.len();
    if digits.is_empty()
        || digits.len() > 16
        || !digits.bytes().all(|b| b.is_ascii_digit())
        || (digits.starts_with('0') && digits.len() > 1)
        || (negative && digits == "0")
    {
        return None;
    }
    let value = digits.parse::<i64>().ok()?;
    if value > MAX_SAFE_INTEGER {
        return None;
    }
    Some(if negative { -value } else { value })
}

impl PropertyKey {
    pub fn from_str(agent: &mut Agent, str: &str) -> Self {
        parse_string_to_integer_property_key(str)
            .map_or_else(|| String::from_str(agent, str).into(), PropertyKey::Integer)
    }

    pub fn from_string(agent: &mut Agent, string: std::string::String) -> Self {
        parse_string_to_integer_property_key(&string)
            .map_or_else(|| String::from_string(agent, string).into(), PropertyKey::Integer)
    }

    pub fn is_array_index(self) -> bool {
        self.into_u32().is_some()
    }

    /// Extract an Array index (an integer in the inclusive range of
    /// `0..=(2^32 - 2)`) from a PropertyKey if it matches the range.
    pub fn into_u32(self) -> Option<u32> {
        let PropertyKey::Integer(int) = self else {
            return None;
        };
        if !(0..=(2i64.pow(32) - 2)).contains(&int) {
            return None;
        }
        Some(int as u32)
    }

    /// The key as a Rust string, for display.
    pub fn as_display(self, agent: &Agent) -> std::string::String {
        match self {
            PropertyKey::Integer(int) => int.to_string(),
            PropertyKey::String(str) => str.to_string_lossy(agent).into_owned(),
        }
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        PropertyKey::String(value)
    }
}

impl From<u32> for PropertyKey {
    fn from(value: u32) -> Self {
        PropertyKey::Integer(value as i64)
    }
}

impl From<usize> for PropertyKey {
    fn from(value: usize) -> Self {
        PropertyKey::Integer(value as i64)
    }
}
