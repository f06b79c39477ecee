// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{operations_on_objects::get, type_conversion::to_string},
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, JsResult, agent::ExceptionType},
    types::{Object, OrdinaryObject, PropertyKey, String, Value},
};

pub(crate) struct ErrorPrototype;

struct ErrorPrototypeToString;
impl Builtin for ErrorPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ErrorPrototype::to_string);
}

impl ErrorPrototype {
    /// ### [20.5.3.4 Error.prototype.toString ( )](https://tc39.es/ecma262/#sec-error.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be the this value.
        // 2. If O is not an Object, throw a TypeError exception.
        let Ok(o) = Object::try_from(this_value) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "'this' is not an object",
            ));
        };
        // 3. Let name be ? Get(O, "name").
        let key = PropertyKey::from_str(agent, "name");
        let name = get(agent, o, key)?;
        // 4. If name is undefined, set name to "Error"; otherwise set name to ? ToString(name).
        let name = if name.is_undefined() {
            String::from_str(agent, "Error")
        } else {
            to_string(agent, name)?
        };
        // 5. Let msg be ? Get(O, "message").
        let key = PropertyKey::from_str(agent, "message");
        let msg = get(agent, o, key)?;
        // 6. If msg is undefined, set msg to the empty String; otherwise set msg to ? ToString(msg).
        let msg = if msg.is_undefined() {
            String::from_str(agent, "")
        } else {
            to_string(agent, msg)?
        };
        if name.is_empty(agent) {
            // 7. If name is the empty String, return msg.
            Ok(msg.into_value())
        } else if msg.is_empty(agent) {
            // 8. If msg is the empty String, return name.
            Ok(name.into_value())
        } else {
            // 9. Return the string-concatenation of name, the code unit 0x003A (COLON), the code unit 0x0020 (SPACE), and msg.
            let result = format!(
                "{}: {}",
                name.to_string_lossy(agent),
                msg.to_string_lossy(agent)
            );
            Ok(Value::from_string(agent, result))
        }
    }

    /// Populates %Error.prototype% and the %RangeError.prototype% and
    /// %TypeError.prototype% objects that inherit from it.
    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let intrinsics = agent.current_realm().intrinsics();
        let this = intrinsics.error_prototype();
        let range_error_prototype = intrinsics.range_error_prototype;
        let type_error_prototype = intrinsics.type_error_prototype;

        let message = Value::from_str(agent, "");
        let name = Value::from_str(agent, "Error");
        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(3)
            .with_property(|builder| {
                builder
                    .with_enumerable(false)
                    .with_key_from_str("message")
                    .with_value(message)
                    .build()
            })
            .with_property(|builder| {
                builder
                    .with_enumerable(false)
                    .with_key_from_str("name")
                    .with_value(name)
                    .build()
            })
            .with_builtin_function_property::<ErrorPrototypeToString>()
            .build();

        create_native_error_prototype(agent, range_error_prototype, "RangeError", message);
        create_native_error_prototype(agent, type_error_prototype, "TypeError", message);
    }
}

/// ### [20.5.6.3 Properties of the NativeError Prototype Objects](https://tc39.es/ecma262/#sec-properties-of-the-nativeerror-prototype-objects)
fn create_native_error_prototype(
    agent: &mut Agent,
    this: OrdinaryObject,
    name: &'static str,
    message: Value,
) {
    let name = Value::from_str(agent, name);
    OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
        .with_property_capacity(2)
        .with_property(|builder| {
            builder
                .with_enumerable(false)
                .with_key_from_str("message")
                .with_value(message)
                .build()
        })
        .with_property(|builder| {
            builder
                .with_enumerable(false)
                .with_key_from_str("name")
                .with_value(name)
                .build()
        })
        .build();
}
