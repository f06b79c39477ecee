// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::type_conversion::to_length,
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, array_buffer::allocate_array_buffer},
    execution::{Agent, JsResult},
    types::{Object, Value},
};

pub(crate) struct ArrayBufferConstructor;
impl Builtin for ArrayBufferConstructor {
    const NAME: &'static str = "ArrayBuffer";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Constructor(ArrayBufferConstructor::constructor);
}

struct ArrayBufferIsView;
impl Builtin for ArrayBufferIsView {
    const NAME: &'static str = "isView";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayBufferConstructor::is_view);
}

impl ArrayBufferConstructor {
    /// ### [25.1.4.1 ArrayBuffer ( length \[ , options \] )](https://tc39.es/ecma262/#sec-arraybuffer-length)
    ///
    /// The length is coerced with ToLength: negative and non-numeric
    /// lengths produce an empty buffer instead of a RangeError.
    fn constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        // 1. If NewTarget is undefined, throw a TypeError exception.
        // Direct calls allocate as if called with `new ArrayBuffer`.
        let new_target = new_target
            .unwrap_or_else(|| agent.current_realm().intrinsics().array_buffer().into_object());
        // 2. Let byteLength be ? ToIndex(length).
        let byte_length = to_length(agent, arguments.get(0))?;
        // 4. Return ? AllocateArrayBuffer(NewTarget, byteLength, requestedMaxByteLength).
        allocate_array_buffer(agent, new_target, byte_length).map(|buffer| buffer.into_value())
    }

    /// ### [25.1.5.1 ArrayBuffer.isView ( arg )](https://tc39.es/ecma262/#sec-arraybuffer.isview)
    fn is_view(_agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. If arg is not an Object, return false.
        // 2. If arg has a [[ViewedArrayBuffer]] internal slot, return true.
        // 3. Return false.
        Ok(arguments.get(0).is_typed_array().into())
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) {
        let intrinsics = agent.current_realm().intrinsics();
        let array_buffer = intrinsics.array_buffer();
        let array_buffer_prototype = intrinsics.array_buffer_prototype();

        OrdinaryObjectBuilder::new_intrinsic_function(agent, array_buffer)
            .with_property_capacity(2)
            .with_builtin_function_property::<ArrayBufferIsView>()
            .with_prototype_property(array_buffer_prototype.into_object())
            .build();
    }
}
