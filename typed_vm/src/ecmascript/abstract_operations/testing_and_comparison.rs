// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.2 Testing and Comparison Operations](https://tc39.es/ecma262/#sec-testing-and-comparison-operations)

use crate::ecmascript::{
    builtins::BuiltinFunction,
    execution::Agent,
    types::Value,
};

/// ### [7.2.3 IsCallable ( argument )](https://tc39.es/ecma262/#sec-iscallable)
///
/// The abstract operation IsCallable takes argument argument (an ECMAScript
/// language value) and returns a Boolean. It determines if argument is a
/// callable function with a [[Call]] internal method.
///
/// Returns the function when it is callable.
pub fn is_callable(argument: Value) -> Option<BuiltinFunction> {
    // 1. If argument is not an Object, return false.
    // 2. If argument has a [[Call]] internal method, return true.
    // 3. Return false.
    BuiltinFunction::try_from(argument).ok()
}

/// ### [7.2.4 IsConstructor ( argument )](https://tc39.es/ecma262/#sec-isconstructor)
///
/// Returns the function when it has a [[Construct]] internal method.
pub fn is_constructor(agent: &Agent, argument: Value) -> Option<BuiltinFunction> {
    // 1. If argument is not an Object, return false.
    // 2. If argument has a [[Construct]] internal method, return true.
    // 3. Return false.
    is_callable(argument).filter(|function| function.is_constructor(agent))
}

/// ### [7.2.9 SameValue ( x, y )](https://tc39.es/ecma262/#sec-samevalue)
///
/// Strings are interned, so handle equality is string equality.
pub fn same_value(x: Value, y: Value) -> bool {
    // 2. If x is a Number, then
    if let (Some(x), Some(y)) = (x.as_f64(), y.as_f64()) {
        // a. Return Number::sameValue(x, y).
        return (x.is_nan() && y.is_nan())
            || (x == y && x.is_sign_negative() == y.is_sign_negative());
    }
    // 3. Return SameValueNonNumber(x, y).
    x == y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::execution::Options;

    #[test]
    fn same_value_distinguishes_zeros_and_equates_nans() {
        assert!(same_value(Value::nan(), Value::nan()));
        assert!(!same_value(Value::from(0), Value::from_f64(-0.0)));
        assert!(same_value(Value::Number(3.0), Value::Integer(3)));
        assert!(!same_value(Value::Null, Value::Undefined));
    }

    #[test]
    fn intrinsic_constructors_are_constructors() {
        let agent = Agent::new(Options::default());
        let array_buffer = agent.current_realm().intrinsics().array_buffer();
        assert!(is_constructor(&agent, array_buffer.into_value()).is_some());
        let to_string = agent.current_realm().intrinsics().array_prototype_to_string();
        assert!(is_callable(to_string.into_value()).is_some());
        assert!(is_constructor(&agent, to_string.into_value()).is_none());
        assert!(is_callable(Value::from(1)).is_none());
    }
}
