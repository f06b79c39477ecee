// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, TypedArray},
    execution::{Agent, JsResult, agent::ExceptionType},
    types::Value,
};

pub(crate) struct ObjectPrototype;

struct ObjectPrototypeToString;
impl Builtin for ObjectPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::to_string);
}
struct ObjectPrototypeValueOf;
impl Builtin for ObjectPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::value_of);
}

impl ObjectPrototype {
    /// ### [20.1.3.6 Object.prototype.toString ( )](https://tc39.es/ecma262/#sec-object.prototype.tostring)
    ///
    /// Buffers and views report the tag their `@@toStringTag` accessors
    /// would produce.
    pub(crate) fn to_string(
        agent: &mut Agent,
        this_value: Value,
        _: ArgumentsList,
    ) -> JsResult<Value> {
        let tag = match this_value {
            // 1. If the this value is undefined, return "[object Undefined]".
            Value::Undefined => "[object Undefined]",
            // 2. If the this value is null, return "[object Null]".
            Value::Null => "[object Null]",
            // 5. If isArray is true, let builtinTag be "Array".
            Value::Array(_) => "[object Array]",
            // 6. Else if O has a [[Call]] internal method, let builtinTag be "Function".
            Value::BuiltinFunction(_) => "[object Function]",
            // 7. Else if O has an [[ErrorData]] internal slot, let builtinTag be "Error".
            Value::Error(_) => "[object Error]",
            Value::ArrayBuffer(_) => "[object ArrayBuffer]",
            Value::Boolean(_) => "[object Boolean]",
            Value::Integer(_) | Value::Number(_) => "[object Number]",
            Value::String(_) => "[object String]",
            Value::Object(_) => "[object Object]",
            _ => match TypedArray::try_from(this_value) {
                Ok(typed_array) => {
                    let tag = format!("[object {}]", typed_array.kind().name());
                    return Ok(Value::from_string(agent, tag));
                }
                Err(_) => "[object Object]",
            },
        };
        Ok(Value::from_str(agent, tag))
    }

    /// ### [20.1.3.7 Object.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-object.prototype.valueof)
    fn value_of(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ToObject(this value).
        if this_value.is_undefined() || this_value.is_null() {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Cannot convert undefined or null to object",
            ));
        }
        Ok(this_value)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let this = agent.current_realm().intrinsics().object_prototype();

        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(2)
            .with_builtin_function_property::<ObjectPrototypeToString>()
            .with_builtin_function_property::<ObjectPrototypeValueOf>()
            .build();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::construct, builtins::TypedArrayKind,
        execution::Options, types::String,
    };

    fn tag_of(agent: &mut Agent, value: Value) -> std::string::String {
        let tag = ObjectPrototype::to_string(agent, value, ArgumentsList(&[])).unwrap();
        String::try_from(tag)
            .unwrap()
            .to_string_lossy(agent)
            .into_owned()
    }

    #[test]
    fn tags_name_the_builtin_kind() {
        let mut agent = Agent::new(Options::default());
        assert_eq!(tag_of(&mut agent, Value::Undefined), "[object Undefined]");
        let object = agent.heap.create_object_with_prototype(None);
        assert_eq!(tag_of(&mut agent, object.into_value()), "[object Object]");

        let constructor = agent
            .current_realm()
            .intrinsics()
            .typed_array_constructor(TypedArrayKind::Float32);
        let view = construct(&mut agent, constructor, Some(ArgumentsList(&[2.into()])), None)
            .unwrap();
        assert_eq!(tag_of(&mut agent, view.into_value()), "[object Float32Array]");
    }

    #[test]
    fn value_of_rejects_nullish_receivers() {
        let mut agent = Agent::new(Options::default());
        assert_eq!(
            ObjectPrototype::value_of(&mut agent, Value::from(7), ArgumentsList(&[])).unwrap(),
            Value::from(7)
        );
        let error =
            ObjectPrototype::value_of(&mut agent, Value::Null, ArgumentsList(&[])).unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    }
}
