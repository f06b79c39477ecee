// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::trace;

use crate::ecmascript::{
    abstract_operations::type_conversion::resolve_relative_index,
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{
        ArgumentsList, ArrayBuffer, Behaviour, Builtin, BuiltinGetter,
        array_buffer::clone_array_buffer,
    },
    execution::{Agent, JsResult, agent::ExceptionType},
    types::Value,
};

pub(crate) struct ArrayBufferPrototype;

struct ArrayBufferPrototypeGetByteLength;
impl Builtin for ArrayBufferPrototypeGetByteLength {
    const NAME: &'static str = "get byteLength";
    const KEY: Option<&'static str> = Some("byteLength");
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayBufferPrototype::get_byte_length);
}
impl BuiltinGetter for ArrayBufferPrototypeGetByteLength {}

struct ArrayBufferPrototypeSlice;
impl Builtin for ArrayBufferPrototypeSlice {
    const NAME: &'static str = "slice";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayBufferPrototype::slice);
}

impl ArrayBufferPrototype {
    /// ### [25.1.6.1 get ArrayBuffer.prototype.byteLength](https://tc39.es/ecma262/#sec-get-arraybuffer.prototype.bytelength)
    ///
    /// ArrayBuffer.prototype.byteLength is an accessor property whose set
    /// accessor function is undefined.
    fn get_byte_length(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be the this value.
        // 2. Perform ? RequireInternalSlot(O, [[ArrayBufferData]]).
        let o = require_internal_slot_array_buffer(agent, this_value)?;
        // 5. Let length be O.[[ArrayBufferByteLength]].
        // 6. Return 𝔽(length).
        Ok(Value::from_f64(o.byte_length(agent) as f64))
    }

    /// ### [25.1.6.7 ArrayBuffer.prototype.slice ( start, end )](https://tc39.es/ecma262/#sec-arraybuffer.prototype.slice)
    fn slice(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let start = arguments.get(0);
        let end = arguments.get(1);
        // 1. Let O be the this value.
        // 2. Perform ? RequireInternalSlot(O, [[ArrayBufferData]]).
        let o = require_internal_slot_array_buffer(agent, this_value)?;
        // 5. Let len be O.[[ArrayBufferByteLength]].
        let len = o.byte_length(agent) as u64;
        // 6-9. Let first be the relative start clamped to len.
        let first = resolve_relative_index(agent, start, len, 0)?;
        // 10-13. If end is undefined, let final be len; otherwise the
        //        relative end clamped to len.
        let r#final = resolve_relative_index(agent, end, len, len)?;
        // 14. Let newLen be max(final - first, 0).
        let new_len = r#final.saturating_sub(first);
        trace!(first, new_len, "slicing array buffer");
        // 15-27. Copy the bytes from first to final into a new ArrayBuffer.
        // The result always uses %ArrayBuffer.prototype%: species lookup is
        // not supported.
        let new = clone_array_buffer(agent, o, first as usize, new_len as usize)?;
        // 28. Return new.
        Ok(new.into_value())
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let intrinsics = agent.current_realm().intrinsics();
        let this = intrinsics.array_buffer_prototype();
        let array_buffer_constructor = intrinsics.array_buffer();

        OrdinaryObjectBuilder::new_intrinsic_object(agent, this)
            .with_property_capacity(3)
            .with_builtin_function_getter_property::<ArrayBufferPrototypeGetByteLength>()
            .with_constructor_property(array_buffer_constructor)
            .with_builtin_function_property::<ArrayBufferPrototypeSlice>()
            .build();
    }
}

#[inline]
fn require_internal_slot_array_buffer(agent: &mut Agent, o: Value) -> JsResult<ArrayBuffer> {
    match ArrayBuffer::try_from(o) {
        Ok(array_buffer) => Ok(array_buffer),
        Err(_) => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Expected this to be ArrayBuffer",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::{builtins::array_buffer::allocate_array_buffer, execution::Options};

    fn filled_buffer(agent: &mut Agent, length: u8) -> ArrayBuffer {
        let constructor = agent.current_realm().intrinsics().array_buffer().into_object();
        let buffer = allocate_array_buffer(agent, constructor, length.into()).unwrap();
        for i in 0..length {
            buffer.get_data_block_mut(agent).set::<u8>(i.into(), i);
        }
        buffer
    }

    fn slice_of(agent: &mut Agent, buffer: ArrayBuffer, arguments: &[Value]) -> Vec<u8> {
        let result =
            ArrayBufferPrototype::slice(agent, buffer.into_value(), ArgumentsList(arguments))
                .unwrap();
        ArrayBuffer::try_from(result).unwrap().as_slice(agent).to_vec()
    }

    #[test]
    fn slice_resolves_relative_bounds() {
        let mut agent = Agent::new(Options::default());
        let buffer = filled_buffer(&mut agent, 8);
        assert_eq!(slice_of(&mut agent, buffer, &[]), vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(slice_of(&mut agent, buffer, &[Value::from(6)]), vec![6, 7]);
        assert_eq!(slice_of(&mut agent, buffer, &[Value::from(-3)]), vec![5, 6, 7]);
        assert_eq!(
            slice_of(&mut agent, buffer, &[Value::from(2), Value::from(-4)]),
            vec![2, 3]
        );
        assert_eq!(
            slice_of(&mut agent, buffer, &[Value::from(5), Value::from(2)]),
            Vec::<u8>::new()
        );
        let abc = Value::from_str(&mut agent, "abc");
        assert_eq!(slice_of(&mut agent, buffer, &[abc]), vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            slice_of(&mut agent, buffer, &[Value::from(1), abc]),
            Vec::<u8>::new()
        );
    }

    #[test]
    fn slice_copies_instead_of_aliasing() {
        let mut agent = Agent::new(Options::default());
        let buffer = filled_buffer(&mut agent, 4);
        let result =
            ArrayBufferPrototype::slice(&mut agent, buffer.into_value(), ArgumentsList(&[]))
                .unwrap();
        let copy = ArrayBuffer::try_from(result).unwrap();
        assert_ne!(copy, buffer);
        buffer.get_data_block_mut(&mut agent).set::<u8>(0, 200);
        assert_eq!(copy.as_slice(&agent)[0], 0);
    }

    #[test]
    fn accessors_require_an_array_buffer() {
        let mut agent = Agent::new(Options::default());
        let error = ArrayBufferPrototype::get_byte_length(
            &mut agent,
            Value::from(1),
            ArgumentsList(&[]),
        )
        .unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
        let error =
            ArrayBufferPrototype::slice(&mut agent, Value::Undefined, ArgumentsList(&[]))
                .unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    }
}
