// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.1 Type Conversion](https://tc39.es/ecma262/#sec-type-conversion)
//!
//! The ECMAScript language implicitly performs automatic type conversion as
//! needed. To clarify the semantics of certain constructs it is useful to
//! define a set of conversion abstract operations. The conversion abstract
//! operations are polymorphic; they can accept a value of any ECMAScript
//! language type.

use super::{
    operations_on_objects::{call_function, get},
    testing_and_comparison::is_callable,
};
use crate::ecmascript::{
    execution::{Agent, JsResult, agent::ExceptionType},
    types::{
        MAX_SAFE_INTEGER, Object, PropertyKey, String, Value, parse_string_to_integer_property_key,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    String = 1,
    Number,
}

/// ### [7.1.1 ToPrimitive ( input \[ , preferredType \] )](https://tc39.es/ecma262/#sec-toprimitive)
///
/// The abstract operation ToPrimitive takes argument input (an ECMAScript
/// language value) and optional argument preferredType (STRING or NUMBER) and
/// returns either a normal completion containing an ECMAScript language value
/// or a throw completion. It converts its input argument to a non-Object type.
///
/// None of the objects of this crate define `@@toPrimitive`, so objects go
/// straight to OrdinaryToPrimitive.
pub fn to_primitive(
    agent: &mut Agent,
    input: Value,
    preferred_type: Option<PreferredType>,
) -> JsResult<Value> {
    // 1. If input is an Object, then
    if let Ok(input) = Object::try_from(input) {
        // c. If preferredType is not present, let preferredType be NUMBER.
        // d. Return ? OrdinaryToPrimitive(input, preferredType).
        ordinary_to_primitive(
            agent,
            input,
            preferred_type.unwrap_or(PreferredType::Number),
        )
    } else {
        // 2. Return input.
        Ok(input)
    }
}

/// #### [7.1.1.1 OrdinaryToPrimitive ( O, hint )](https://tc39.es/ecma262/#sec-ordinarytoprimitive)
pub(crate) fn ordinary_to_primitive(
    agent: &mut Agent,
    o: Object,
    hint: PreferredType,
) -> JsResult<Value> {
    let to_string_key = PropertyKey::from_str(agent, "toString");
    let value_of_key = PropertyKey::from_str(agent, "valueOf");
    let method_names = match hint {
        // 1. If hint is STRING, then
        //    a. Let methodNames be « "toString", "valueOf" ».
        PreferredType::String => [to_string_key, value_of_key],
        // 2. Else,
        //    a. Let methodNames be « "valueOf", "toString" ».
        PreferredType::Number => [value_of_key, to_string_key],
    };
    // 3. For each element name of methodNames, do
    for name in method_names {
        // a. Let method be ? Get(O, name).
        let method = get(agent, o, name)?;
        // b. If IsCallable(method) is true, then
        if let Some(method) = is_callable(method) {
            // i. Let result be ? Call(method, O).
            let result = call_function(agent, method, o.into_value(), None)?;
            // ii. If result is not an Object, return result.
            if !result.is_object() {
                return Ok(result);
            }
        }
    }
    // 4. Throw a TypeError exception.
    Err(agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "Cannot convert object to primitive value",
    ))
}

/// ### [7.1.2 ToBoolean ( argument )](https://tc39.es/ecma262/#sec-toboolean)
pub fn to_boolean(agent: &Agent, argument: Value) -> bool {
    match argument {
        Value::Undefined | Value::Null => false,
        Value::Boolean(bool) => bool,
        Value::String(string) => !string.is_empty(agent),
        Value::Integer(int) => int != 0,
        Value::Number(number) => !(number == 0.0 || number.is_nan()),
        _ => true,
    }
}

/// ### [7.1.4 ToNumber ( argument )](https://tc39.es/ecma262/#sec-tonumber)
pub fn to_number(agent: &mut Agent, argument: Value) -> JsResult<f64> {
    match argument {
        // 3. If argument is undefined, return NaN.
        Value::Undefined => Ok(f64::NAN),
        // 4. If argument is either null or false, return +0𝔽.
        // 5. If argument is true, return 1𝔽.
        Value::Null => Ok(0.0),
        Value::Boolean(bool) => Ok(if bool { 1.0 } else { 0.0 }),
        // 6. If argument is a String, return StringToNumber(argument).
        Value::String(string) => Ok(string_to_number(&string.to_string_lossy(agent))),
        // 1. If argument is a Number, return argument.
        Value::Integer(int) => Ok(int as f64),
        Value::Number(number) => Ok(number),
        // 8. Let primValue be ? ToPrimitive(argument, NUMBER).
        // 9. Assert: primValue is not an Object.
        // 10. Return ? ToNumber(primValue).
        _ => {
            let primitive = to_primitive(agent, argument, Some(PreferredType::Number))?;
            debug_assert!(!primitive.is_object());
            to_number(agent, primitive)
        }
    }
}

/// Whitespace and line terminators removed by TrimString.
fn is_trimmable_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{000A}'
            | '\u{000D}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Matches the StrUnsignedDecimalLiteral grammar, minus `Infinity`.
fn is_unsigned_decimal_literal(str: &str) -> bool {
    let (mantissa, exponent) = match str.find(['e', 'E']) {
        Some(index) => (&str[..index], Some(&str[index + 1..])),
        None => (str, None),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !digits(integer) || !digits(fraction) || (integer.is_empty() && fraction.is_empty()) {
        return false;
    }
    match exponent {
        None => true,
        Some(exponent) => {
            let exponent = exponent
                .strip_prefix(['+', '-'])
                .unwrap_or(exponent);
            !exponent.is_empty() && digits(exponent)
        }
    }
}

/// ### [7.1.4.1.1 StringToNumber ( str )](https://tc39.es/ecma262/#sec-stringtonumber)
///
/// Total: every string that is not a StringNumericLiteral yields NaN.
pub fn string_to_number(str: &str) -> f64 {
    // 1. Let literal be ParseText(str, StringNumericLiteral).
    let trimmed = str.trim_matches(is_trimmable_whitespace);

    // StrWhiteSpace_opt alone has the value 0.
    if trimmed.is_empty() {
        return 0.0;
    }

    // NonDecimalIntegerLiteral does not take a sign.
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits.chars().try_fold(0.0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
        .unwrap_or(f64::NAN);
    }

    let (negative, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let magnitude = if unsigned == "Infinity" {
        f64::INFINITY
    } else if is_unsigned_decimal_literal(unsigned) {
        // 2. If literal is a List of errors, return NaN.
        // 3. Return the StringNumericValue of literal.
        match fast_float::parse::<f64, _>(unsigned) {
            Ok(value) => value,
            Err(_) => return f64::NAN,
        }
    } else {
        return f64::NAN;
    };
    if negative { -magnitude } else { magnitude }
}

/// ### [7.1.5 ToIntegerOrInfinity ( argument )](https://tc39.es/ecma262/#sec-tointegerorinfinity)
///
/// Converts `argument` to an integral Number or an infinity; NaN and -0
/// become +0.
pub fn to_integer_or_infinity(agent: &mut Agent, argument: Value) -> JsResult<f64> {
    // Fast path: integers are already integral.
    if let Value::Integer(int) = argument {
        return Ok(int as f64);
    }
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    Ok(integer_or_infinity(number))
}

/// Steps 2-5 of ToIntegerOrInfinity on an already converted Number.
pub(crate) fn integer_or_infinity(number: f64) -> f64 {
    // 2. If number is one of NaN, +0𝔽, or -0𝔽, return 0.
    if number.is_nan() || number == 0.0 {
        return 0.0;
    }
    // 3. If number is +∞𝔽, return +∞.
    // 4. If number is -∞𝔽, return -∞.
    // 5. Return truncate(ℝ(number)).
    number.trunc()
}

/// ### [7.1.20 ToLength ( argument )](https://tc39.es/ecma262/#sec-tolength)
///
/// Clamps `argument` to an integer in `0..=2^53 - 1`; negative and
/// non-numeric arguments become 0.
pub fn to_length(agent: &mut Agent, argument: Value) -> JsResult<u64> {
    // 1. Let len be ? ToIntegerOrInfinity(argument).
    let len = to_integer_or_infinity(agent, argument)?;
    // 2. If len ≤ 0, return +0𝔽.
    if len <= 0.0 {
        return Ok(0);
    }
    // 3. Return 𝔽(min(len, 2^53 - 1)).
    Ok(len.min(MAX_SAFE_INTEGER as f64) as u64)
}

/// Resolves a relative start or end argument against `len`: negative
/// values count back from `len`, the result is clamped to `0..=len`, and
/// undefined selects `default`.
pub(crate) fn resolve_relative_index(
    agent: &mut Agent,
    argument: Value,
    len: u64,
    default: u64,
) -> JsResult<u64> {
    if argument.is_undefined() {
        return Ok(default);
    }
    let relative = to_integer_or_infinity(agent, argument)?;
    Ok(if relative < 0.0 {
        (len as f64 + relative).max(0.0) as u64
    } else {
        relative.min(len as f64) as u64
    })
}

/// ### [7.1.17 ToString ( argument )](https://tc39.es/ecma262/#sec-tostring)
pub fn to_string(agent: &mut Agent, argument: Value) -> JsResult<String> {
    match argument {
        // 3. If argument is undefined, return "undefined".
        Value::Undefined => Ok(String::from_str(agent, "undefined")),
        // 4. If argument is null, return "null".
        Value::Null => Ok(String::from_str(agent, "null")),
        // 5. If argument is true, return "true".
        // 6. If argument is false, return "false".
        Value::Boolean(bool) => Ok(String::from_str(agent, if bool { "true" } else { "false" })),
        // 1. If argument is a String, return argument.
        Value::String(string) => Ok(string),
        // 7. If argument is a Number, return Number::toString(argument, 10).
        Value::Integer(int) => Ok(String::from_string(agent, int.to_string())),
        Value::Number(number) => Ok(number_to_string(agent, number)),
        // 10. Let primValue be ? ToPrimitive(argument, STRING).
        // 11. Assert: primValue is not an Object.
        // 12. Return ? ToString(primValue).
        _ => {
            let primitive = to_primitive(agent, argument, Some(PreferredType::String))?;
            debug_assert!(!primitive.is_object());
            to_string(agent, primitive)
        }
    }
}

/// ### [6.1.6.1.20 Number::toString ( x, radix )](https://tc39.es/ecma262/#sec-numeric-types-number-tostring)
///
/// Radix 10 only.
pub(crate) fn number_to_string(agent: &mut Agent, x: f64) -> String {
    String::from_string(agent, format_number(x))
}

/// The shortest round-tripping decimal form of `x`, as Number::toString
/// writes it.
pub(crate) fn format_number(x: f64) -> std::string::String {
    // 1. If x is NaN, return "NaN".
    if x.is_nan() {
        return "NaN".into();
    }
    // 2. If x is either +0𝔽 or -0𝔽, return "0".
    if x == 0.0 {
        return "0".into();
    }
    // 4. If x is +∞𝔽, return "Infinity".
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    let mut buffer = ryu_js::Buffer::new();
    buffer.format_finite(x).to_owned()
}

/// ### [7.1.19 ToPropertyKey ( argument )](https://tc39.es/ecma262/#sec-topropertykey)
pub fn to_property_key(agent: &mut Agent, argument: Value) -> JsResult<PropertyKey> {
    match argument {
        Value::Integer(int) if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&int) => {
            Ok(PropertyKey::Integer(int))
        }
        _ => {
            // 1. Let key be ? ToPrimitive(argument, STRING).
            // 3. Return ! ToString(key).
            let string = to_string(agent, argument)?;
            Ok(string
                .as_str(agent)
                .and_then(parse_string_to_integer_property_key)
                .map_or(PropertyKey::String(string), PropertyKey::Integer))
        }
    }
}

/// ### [7.1.21 CanonicalNumericIndexString ( argument )](https://tc39.es/ecma262/#sec-canonicalnumericindexstring)
///
/// Returns the Number that `key` is the canonical string form of, or `None`
/// if `key` is not a numeric string.
pub(crate) fn canonical_numeric_index_string(agent: &Agent, key: PropertyKey) -> Option<f64> {
    let string = match key {
        PropertyKey::Integer(int) => return Some(int as f64),
        PropertyKey::String(string) => string.as_str(agent)?,
    };
    // 1. If argument is "-0", return -0𝔽.
    if string == "-0" {
        return Some(-0.0);
    }
    // 2. Let n be ! ToNumber(argument).
    let n = string_to_number(string);
    // 3. If ! ToString(n) is argument, return n.
    // 4. Return undefined.
    (format_number(n) == string).then_some(n)
}
