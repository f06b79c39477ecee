// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{OrdinaryObject, String};
use crate::{
    ecmascript::{
        abstract_operations::type_conversion::{to_number, to_string},
        builtins::{
            array::Array, array_buffer::ArrayBuffer, builtin_function::BuiltinFunction,
            error::Error,
        },
        execution::{Agent, JsResult},
    },
    heap::indexes::TypedArrayIndex,
};

/// Largest integer magnitude that a Number represents exactly.
pub(crate) const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// ### [6.1 ECMAScript Language Types](https://tc39.es/ecma262/#sec-ecmascript-language-types)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
    /// ### [6.1.1 The Undefined Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-undefined-type)
    #[default]
    Undefined,

    /// ### [6.1.2 The Null Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-null-type)
    Null,

    /// ### [6.1.3 The Boolean Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-boolean-type)
    Boolean(bool),

    /// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
    String(String),

    /// ### [6.1.6.1 The Number Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-number-type)
    ///
    /// Integral Numbers within the safe integer range, excluding -0.
    Integer(i64),
    /// Every other Number: fractions, -0, NaN, the infinities, and integers
    /// outside the safe range.
    Number(f64),

    /// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
    Object(OrdinaryObject),
    Array(Array),
    ArrayBuffer(ArrayBuffer),
    BuiltinFunction(BuiltinFunction),
    Error(Error),

    // TypedArrays
    Int8Array(TypedArrayIndex),
    Uint8Array(TypedArrayIndex),
    Uint8ClampedArray(TypedArrayIndex),
    Int16Array(TypedArrayIndex),
    Uint16Array(TypedArrayIndex),
    Int32Array(TypedArrayIndex),
    Uint32Array(TypedArrayIndex),
    Float32Array(TypedArrayIndex),
    Float64Array(TypedArrayIndex),
}

impl Value {
    pub fn from_str(agent: &mut Agent, str: &str) -> Value {
        String::from_str(agent, str).into_value()
    }

    pub fn from_string(agent: &mut Agent, string: std::string::String) -> Value {
        String::from_string(agent, string).into_value()
    }

    /// Creates a Number value, choosing the integer representation whenever
    /// it is exact.
    pub fn from_f64(value: f64) -> Value {
        if value.fract() == 0.0
            && value.abs() <= MAX_SAFE_INTEGER as f64
            && !(value == 0.0 && value.is_sign_negative())
        {
            Value::Integer(value as i64)
        } else {
            Value::Number(value)
        }
    }

    pub fn nan() -> Self {
        Value::Number(f64::NAN)
    }

    pub fn infinity() -> Self {
        Value::Number(f64::INFINITY)
    }

    pub fn neg_infinity() -> Self {
        Value::Number(f64::NEG_INFINITY)
    }

    pub fn is_object(self) -> bool {
        !matches!(
            self,
            Value::Undefined
                | Value::Null
                | Value::Boolean(_)
                | Value::String(_)
                | Value::Integer(_)
                | Value::Number(_)
        )
    }

    pub fn is_null(self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    pub fn is_typed_array(self) -> bool {
        matches!(
            self,
            Value::Int8Array(_)
                | Value::Uint8Array(_)
                | Value::Uint8ClampedArray(_)
                | Value::Int16Array(_)
                | Value::Uint16Array(_)
                | Value::Int32Array(_)
                | Value::Uint32Array(_)
                | Value::Float32Array(_)
                | Value::Float64Array(_)
        )
    }

    /// The mathematical value of a Number value, or `None` for every other
    /// type.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(i as f64),
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn to_number(self, agent: &mut Agent) -> JsResult<f64> {
        to_number(agent, self)
    }

    pub fn to_string(self, agent: &mut Agent) -> JsResult<String> {
        to_string(agent, self)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, |v| v.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::from_f64(value)
    }
}

impl TryFrom<i64> for Value {
    type Error = ();
    fn try_from(value: i64) -> Result<Self, ()> {
        if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value) {
            Ok(Value::Integer(value))
        } else {
            Err(())
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Boolean(bool) => Ok(bool),
            _ => Err(()),
        }
    }
}

macro_rules! impl_value_from_n {
    ($size: ty) => {
        impl From<$size> for Value {
            fn from(value: $size) -> Self {
                Value::Integer(i64::from(value))
            }
        }
    };
}

impl_value_from_n!(u8);
impl_value_from_n!(i8);
impl_value_from_n!(u16);
impl_value_from_n!(i16);
impl_value_from_n!(u32);
impl_value_from_n!(i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f64_normalizes_integers() {
        assert_eq!(Value::from_f64(250.0), Value::from(250));
        assert_eq!(Value::from_f64(-6.0), Value::Integer(-6));
        assert_eq!(Value::from_f64(0.0), Value::Integer(0));
        assert!(matches!(Value::from_f64(-0.0), Value::Number(n) if n == 0.0 && n.is_sign_negative()));
        assert_eq!(Value::from_f64(0.5), Value::Number(0.5));
        assert_eq!(Value::from_f64(1e300), Value::Number(1e300));
        assert!(Value::from_f64(f64::NAN).is_nan());
        assert_eq!(Value::from(1.5f64).as_f64(), Some(1.5));
    }

    #[test]
    fn safe_integer_range() {
        assert_eq!(
            Value::try_from(MAX_SAFE_INTEGER),
            Ok(Value::Integer(MAX_SAFE_INTEGER))
        );
        assert_eq!(Value::try_from(MAX_SAFE_INTEGER + 1), Err(()));
    }
}
