// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::abstract_operations::{create_typed_array, require_internal_slot_typed_array};
use crate::ecmascript::{
    abstract_operations::type_conversion::resolve_relative_index,
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{
        ArgumentsList, Behaviour, Builtin, BuiltinGetter,
        indexed_collections::array_objects::array_prototype::ArrayPrototypeJoin,
    },
    execution::{Agent, JsResult, agent::ExceptionType},
    types::{Object, Value},
};

pub(crate) struct TypedArrayIntrinsicObject;

impl Builtin for TypedArrayIntrinsicObject {
    const BEHAVIOUR: Behaviour = Behaviour::Constructor(Self::constructor);
    const LENGTH: u8 = 0;
    const NAME: &'static str = "TypedArray";
}

impl TypedArrayIntrinsicObject {
    fn constructor(
        agent: &mut Agent,
        _this_value: Value,
        _arguments: ArgumentsList,
        _new_target: Option<Object>,
    ) -> JsResult<Value> {
        Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Abstract class TypedArray not directly constructable",
        ))
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let intrinsics = agent.current_realm().intrinsics();
        let typed_array = intrinsics.typed_array();
        let typed_array_prototype = intrinsics.typed_array_prototype();

        OrdinaryObjectBuilder::new_intrinsic_function(agent, typed_array)
            .with_property_capacity(1)
            .with_prototype_property(typed_array_prototype.into_object())
            .build();
    }
}

pub(crate) struct TypedArrayPrototype;

struct TypedArrayPrototypeGetBuffer;
impl Builtin for TypedArrayPrototypeGetBuffer {
    const NAME: &'static str = "get buffer";
    const KEY: Option<&'static str> = Some("buffer");
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(TypedArrayPrototype::get_buffer);
}
impl BuiltinGetter for TypedArrayPrototypeGetBuffer {}
struct TypedArrayPrototypeGetByteLength;
impl Builtin for TypedArrayPrototypeGetByteLength {
    const NAME: &'static str = "get byteLength";
    const KEY: Option<&'static str> = Some("byteLength");
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(TypedArrayPrototype::get_byte_length);
}
impl BuiltinGetter for TypedArrayPrototypeGetByteLength {}
struct TypedArrayPrototypeGetByteOffset;
impl Builtin for TypedArrayPrototypeGetByteOffset {
    const NAME: &'static str = "get byteOffset";
    const KEY: Option<&'static str> = Some("byteOffset");
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(TypedArrayPrototype::get_byte_offset);
}
impl BuiltinGetter for TypedArrayPrototypeGetByteOffset {}
struct TypedArrayPrototypeGetLength;
impl Builtin for TypedArrayPrototypeGetLength {
    const NAME: &'static str = "get length";
    const KEY: Option<&'static str> = Some("length");
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(TypedArrayPrototype::get_length);
}
impl BuiltinGetter for TypedArrayPrototypeGetLength {}
struct TypedArrayPrototypeSubarray;
impl Builtin for TypedArrayPrototypeSubarray {
    const NAME: &'static str = "subarray";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(TypedArrayPrototype::subarray);
}

impl TypedArrayPrototype {
    /// ### [23.2.3.2 get %TypedArray%.prototype.buffer](https://tc39.es/ecma262/#sec-get-%typedarray%.prototype.buffer)
    fn get_buffer(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be the this value.
        // 2. Perform ? RequireInternalSlot(O, [[TypedArrayName]]).
        // 3. Assert: O has a [[ViewedArrayBuffer]] internal slot.
        // 4. Let buffer be O.[[ViewedArrayBuffer]].
        let o = require_internal_slot_typed_array(agent, this_value)?;

        // 5. Return buffer.
        Ok(o.viewed_array_buffer(agent).into_value())
    }

    /// ### [23.2.3.3 get %TypedArray%.prototype.byteLength](https://tc39.es/ecma262/#sec-get-%typedarray%.prototype.bytelength)
    ///
    /// %TypedArray%.prototype.byteLength is an accessor property whose set
    /// accessor function is undefined.
    fn get_byte_length(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be the this value.
        // 2. Perform ? RequireInternalSlot(O, [[TypedArrayName]]).
        let o = require_internal_slot_typed_array(agent, this_value)?;
        // 6. Let size be TypedArrayByteLength(taRecord).
        // 7. Return 𝔽(size).
        Ok(Value::from_f64(o.byte_length(agent) as f64))
    }

    /// ### [23.2.3.4 get %TypedArray%.prototype.byteOffset](https://tc39.es/ecma262/#sec-get-%typedarray%.prototype.byteoffset)
    fn get_byte_offset(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be the this value.
        // 2. Perform ? RequireInternalSlot(O, [[TypedArrayName]]).
        let o = require_internal_slot_typed_array(agent, this_value)?;
        // 6. Let offset be O.[[ByteOffset]].
        // 7. Return 𝔽(offset).
        Ok(Value::from_f64(o.byte_offset(agent) as f64))
    }

    /// ### [23.2.3.21 get %TypedArray%.prototype.length](https://tc39.es/ecma262/#sec-get-%typedarray%.prototype.length)
    fn get_length(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be the this value.
        // 2. Perform ? RequireInternalSlot(O, [[TypedArrayName]]).
        let o = require_internal_slot_typed_array(agent, this_value)?;
        // 6. Let length be TypedArrayLength(taRecord).
        // 7. Return 𝔽(length).
        Ok(Value::from_f64(o.array_length(agent) as f64))
    }

    /// ### [23.2.3.29 %TypedArray%.prototype.subarray ( start, end )](https://tc39.es/ecma262/#sec-%typedarray%.prototype.subarray)
    ///
    /// Returns a new view of the same kind over the same buffer, covering
    /// the elements from start (inclusive) to end (exclusive). Negative
    /// indices count from the end of the array.
    fn subarray(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let start = arguments.get(0);
        let end = arguments.get(1);
        // 1. Let O be the this value.
        // 2. Perform ? RequireInternalSlot(O, [[TypedArrayName]]).
        // 3. Assert: O has a [[ViewedArrayBuffer]] internal slot.
        let o = require_internal_slot_typed_array(agent, this_value)?;
        // 4. Let buffer be O.[[ViewedArrayBuffer]].
        let buffer = o.viewed_array_buffer(agent);
        // 6-7. Let srcLength be TypedArrayLength(srcRecord).
        let src_length = o.array_length(agent) as u64;
        // 8-11. Let startIndex be the relative start clamped to srcLength.
        let start_index = resolve_relative_index(agent, start, src_length, 0)?;
        // 12-14. Let endIndex be the relative end clamped to srcLength, or
        //        srcLength if end is undefined.
        let end_index = resolve_relative_index(agent, end, src_length, src_length)?;
        // 15. Let elementSize be TypedArrayElementSize(O).
        let element_size = o.element_size();
        // 16. Let srcByteOffset be O.[[ByteOffset]].
        let src_byte_offset = o.byte_offset(agent);
        // 17. Let beginByteOffset be srcByteOffset + (startIndex × elementSize).
        let begin_byte_offset = src_byte_offset + start_index as usize * element_size;
        // 18. If O.[[ArrayLength]] is AUTO and end is undefined, then
        //     a. Let argumentsList be « buffer, 𝔽(beginByteOffset) ».
        // 19. Else,
        //     b. Let newLength be max(endIndex - startIndex, 0).
        let new_length = end_index.saturating_sub(start_index) as usize;
        // 20. Return ? TypedArraySpeciesCreate(O, argumentsList).
        // Species lookup is not supported: the result always has O's own
        // kind and default prototype.
        let result = create_typed_array(
            agent,
            o.kind(),
            None,
            buffer,
            begin_byte_offset,
            new_length,
        );
        Ok(result.into_value())
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let intrinsics = agent.current_realm().intrinsics();
        let this = intrinsics.typed_array_prototype();
        let typed_array_constructor = intrinsics.typed_array();
        let array_prototype_to_string = intrinsics.array_prototype_to_string();

        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(8)
            .with_builtin_function_getter_property::<TypedArrayPrototypeGetBuffer>()
            .with_builtin_function_getter_property::<TypedArrayPrototypeGetByteLength>()
            .with_builtin_function_getter_property::<TypedArrayPrototypeGetByteOffset>()
            .with_constructor_property(typed_array_constructor)
            .with_builtin_function_property::<ArrayPrototypeJoin>()
            .with_builtin_function_getter_property::<TypedArrayPrototypeGetLength>()
            .with_builtin_function_property::<TypedArrayPrototypeSubarray>()
            .with_property(|builder| {
                builder
                    .with_key_from_str("toString")
                    .with_value(array_prototype_to_string.into_value())
                    .with_enumerable(false)
                    .build()
            })
            .build();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::{call, call_function, construct, get},
        builtins::{TypedArray, TypedArrayKind},
        execution::Options,
        types::PropertyKey,
    };

    fn uint16_array(agent: &mut Agent, length: u32) -> TypedArray {
        let constructor = agent
            .current_realm()
            .intrinsics()
            .typed_array_constructor(TypedArrayKind::Uint16);
        let object = construct(agent, constructor, Some(ArgumentsList(&[length.into()])), None)
            .unwrap();
        object.as_typed_array().unwrap()
    }

    #[test]
    fn subarray_shares_the_buffer() {
        let mut agent = Agent::new(Options::default());
        let array = uint16_array(&mut agent, 10);
        let result = TypedArrayPrototype::subarray(
            &mut agent,
            array.into_value(),
            ArgumentsList(&[Value::from(2), Value::from(-3)]),
        )
        .unwrap();
        let sub = TypedArray::try_from(result).unwrap();
        assert_eq!(sub.kind(), TypedArrayKind::Uint16);
        assert_eq!(sub.array_length(&agent), 5);
        assert_eq!(sub.byte_offset(&agent), 4);
        assert_eq!(sub.viewed_array_buffer(&agent), array.viewed_array_buffer(&agent));

        let inverted = TypedArrayPrototype::subarray(
            &mut agent,
            array.into_value(),
            ArgumentsList(&[Value::from(7), Value::from(3)]),
        )
        .unwrap();
        assert_eq!(TypedArray::try_from(inverted).unwrap().array_length(&agent), 0);
    }

    #[test]
    fn getters_reject_other_receivers() {
        let mut agent = Agent::new(Options::default());
        let buffer_constructor = agent.current_realm().intrinsics().array_buffer();
        let buffer = construct(&mut agent, buffer_constructor, None, None).unwrap();
        let error =
            TypedArrayPrototype::get_length(&mut agent, buffer.into(), ArgumentsList(&[]))
                .unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    }

    #[test]
    fn prototype_accessors_are_inherited() {
        let mut agent = Agent::new(Options::default());
        let array = uint16_array(&mut agent, 3);
        let key = PropertyKey::from_str(&mut agent, "byteLength");
        assert_eq!(get(&mut agent, array, key).unwrap(), Value::from(6));
        let key = PropertyKey::from_str(&mut agent, "length");
        assert_eq!(get(&mut agent, array, key).unwrap(), Value::from(3));

        let to_string = agent.current_realm().intrinsics().array_prototype_to_string();
        let result = call_function(&mut agent, to_string, array.into_value(), None).unwrap();
        let Value::String(result) = result else {
            panic!("Expected a string, got {result:?}");
        };
        assert_eq!(result.as_str(&agent), Some("0,0,0"));
    }

    #[test]
    fn join_is_installed_on_the_prototype() {
        let mut agent = Agent::new(Options::default());
        let array = uint16_array(&mut agent, 3);
        array.set_element(&mut agent, 1, 7.0);
        let key = PropertyKey::from_str(&mut agent, "join");
        let join = get(&mut agent, array, key).unwrap();
        let separator = Value::from_str(&mut agent, "-");
        let result = call(&mut agent, join, array.into_value(), Some(ArgumentsList(&[separator])))
            .unwrap();
        let Value::String(result) = result else {
            panic!("Expected a string, got {result:?}");
        };
        assert_eq!(result.as_str(&agent), Some("0-7-0"));

        let key = PropertyKey::from_str(&mut agent, "toString");
        let to_string = get(&mut agent, array, key).unwrap();
        let result = call(&mut agent, to_string, array.into_value(), None).unwrap();
        let Value::String(result) = result else {
            panic!("Expected a string, got {result:?}");
        };
        assert_eq!(result.as_str(&agent), Some("0,7,0"));
    }

    #[test]
    fn abstract_constructor_throws() {
        let mut agent = Agent::new(Options::default());
        let typed_array = agent.current_realm().intrinsics().typed_array();
        let error = construct(&mut agent, typed_array, None, None).unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    }
}
