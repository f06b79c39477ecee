// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{call_function, get, length_of_array_like},
        testing_and_comparison::is_callable,
        type_conversion::to_string,
    },
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{
        ArgumentsList, Behaviour, Builtin,
        fundamental_objects::object_objects::object_prototype::ObjectPrototype,
    },
    execution::{Agent, JsResult, agent::ExceptionType},
    types::{Object, PropertyKey, Value},
};

pub(crate) struct ArrayPrototype;

/// Installed on %TypedArray.prototype% as well; the algorithm only needs
/// an array-like receiver.
pub(crate) struct ArrayPrototypeJoin;
impl Builtin for ArrayPrototypeJoin {
    const NAME: &'static str = "join";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::join);
}
/// Shared with %TypedArray.prototype% as its `toString` property.
pub(crate) struct ArrayPrototypeToString;
impl Builtin for ArrayPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::to_string);
}

impl ArrayPrototype {
    /// ### [23.1.3.18 Array.prototype.join ( separator )](https://tc39.es/ecma262/#sec-array.prototype.join)
    ///
    /// Generic over any array-like receiver, so typed arrays join through
    /// their integer-indexed `[[Get]]`.
    fn join(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let separator = arguments.get(0);

        // 1. Let O be ? ToObject(this value).
        let o = require_object(agent, this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(agent, o)?;
        if len == 0 {
            return Ok(Value::from_str(agent, ""));
        }
        let len = len as usize;
        // 3. If separator is undefined, let sep be ",".
        let separator = if separator.is_undefined() {
            std::string::String::from(",")
        } else {
            // 4. Else, let sep be ? ToString(separator).
            to_string(agent, separator)?
                .to_string_lossy(agent)
                .into_owned()
        };
        // 5. Let R be the empty String.
        let mut r = std::string::String::with_capacity(len * 4);
        // 6. Let k be 0.
        // 7. Repeat, while k < len,
        for k in 0..len {
            // a. If k > 0, set R to the string-concatenation of R and sep.
            if k > 0 {
                r.push_str(&separator);
            }
            // b. Let element be ? Get(O, ! ToString(𝔽(k))).
            let element = get(agent, o, PropertyKey::from(k))?;
            // c. If element is neither undefined nor null, then
            if !element.is_undefined() && !element.is_null() {
                // i. Let S be ? ToString(element).
                let s = to_string(agent, element)?;
                // ii. Set R to the string-concatenation of R and S.
                r.push_str(&s.to_string_lossy(agent));
            }
            // d. Set k to k + 1.
        }
        // 8. Return R.
        Ok(Value::from_string(agent, r))
    }

    /// ### [23.1.3.36 Array.prototype.toString ( )](https://tc39.es/ecma262/#sec-array.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let array be ? ToObject(this value).
        let array = require_object(agent, this_value)?;
        // 2. Let func be ? Get(array, "join").
        let key = PropertyKey::from_str(agent, "join");
        let func = get(agent, array, key)?;
        // 3. If IsCallable(func) is false, set func to the intrinsic function %Object.prototype.toString%.
        let Some(func) = is_callable(func) else {
            return ObjectPrototype::to_string(agent, array.into_value(), ArgumentsList(&[]));
        };
        // 4. Return ? Call(func, array).
        call_function(agent, func, array.into_value(), None)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let intrinsics = agent.current_realm().intrinsics();
        let this = intrinsics.array_prototype();
        let to_string = intrinsics.array_prototype_to_string();

        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(2)
            .with_builtin_function_property::<ArrayPrototypeJoin>()
            .with_property(|builder| {
                builder
                    .with_key_from_str(ArrayPrototypeToString::NAME)
                    .with_value(to_string.into_value())
                    .with_enumerable(ArrayPrototypeToString::ENUMERABLE)
                    .build()
            })
            .build();
    }
}

/// Primitive receivers have no wrapper objects here, so ToObject reduces
/// to a type check.
fn require_object(agent: &mut Agent, value: Value) -> JsResult<Object> {
    Object::try_from(value).map_err(|_| {
        agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Expected this to be an object",
        )
    })
}
