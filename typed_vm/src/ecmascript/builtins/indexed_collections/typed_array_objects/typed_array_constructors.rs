// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::abstract_operations::{
    allocate_typed_array, get_typed_array_prototype, initialize_typed_array_from_array_buffer,
    initialize_typed_array_from_array_like, initialize_typed_array_from_typed_array,
};
use crate::ecmascript::{
    abstract_operations::type_conversion::to_length,
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, TypedArray, TypedArrayKind},
    execution::{Agent, JsResult, agent::ExceptionType},
    types::{Object, U8Clamped, Value, Viewable},
};

pub(crate) struct TypedArrayConstructors;

pub(crate) struct Int8ArrayConstructor;
impl Builtin for Int8ArrayConstructor {
    const NAME: &'static str = "Int8Array";

    const LENGTH: u8 = 3;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(TypedArrayConstructors::int8_array_constructor);
}
pub(crate) struct Uint8ArrayConstructor;
impl Builtin for Uint8ArrayConstructor {
    const NAME: &'static str = "Uint8Array";

    const LENGTH: u8 = 3;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(TypedArrayConstructors::uint8_array_constructor);
}
pub(crate) struct Uint8ClampedArrayConstructor;
impl Builtin for Uint8ClampedArrayConstructor {
    const NAME: &'static str = "Uint8ClampedArray";

    const LENGTH: u8 = 3;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(TypedArrayConstructors::uint8_clamped_array_constructor);
}
pub(crate) struct Int16ArrayConstructor;
impl Builtin for Int16ArrayConstructor {
    const NAME: &'static str = "Int16Array";

    const LENGTH: u8 = 3;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(TypedArrayConstructors::int16_array_constructor);
}
pub(crate) struct Uint16ArrayConstructor;
impl Builtin for Uint16ArrayConstructor {
    const NAME: &'static str = "Uint16Array";

    const LENGTH: u8 = 3;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(TypedArrayConstructors::uint16_array_constructor);
}
pub(crate) struct Int32ArrayConstructor;
impl Builtin for Int32ArrayConstructor {
    const NAME: &'static str = "Int32Array";

    const LENGTH: u8 = 3;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(TypedArrayConstructors::int32_array_constructor);
}
pub(crate) struct Uint32ArrayConstructor;
impl Builtin for Uint32ArrayConstructor {
    const NAME: &'static str = "Uint32Array";

    const LENGTH: u8 = 3;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(TypedArrayConstructors::uint32_array_constructor);
}
pub(crate) struct Float32ArrayConstructor;
impl Builtin for Float32ArrayConstructor {
    const NAME: &'static str = "Float32Array";

    const LENGTH: u8 = 3;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(TypedArrayConstructors::float32_array_constructor);
}
pub(crate) struct Float64ArrayConstructor;
impl Builtin for Float64ArrayConstructor {
    const NAME: &'static str = "Float64Array";

    const LENGTH: u8 = 3;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(TypedArrayConstructors::float64_array_constructor);
}

impl TypedArrayConstructors {
    fn int8_array_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        typed_array_constructor::<i8>(agent, arguments, new_target)
    }

    fn uint8_array_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        typed_array_constructor::<u8>(agent, arguments, new_target)
    }

    fn uint8_clamped_array_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        typed_array_constructor::<U8Clamped>(agent, arguments, new_target)
    }

    fn int16_array_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        typed_array_constructor::<i16>(agent, arguments, new_target)
    }

    fn uint16_array_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        typed_array_constructor::<u16>(agent, arguments, new_target)
    }

    fn int32_array_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        typed_array_constructor::<i32>(agent, arguments, new_target)
    }

    fn uint32_array_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        typed_array_constructor::<u32>(agent, arguments, new_target)
    }

    fn float32_array_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        typed_array_constructor::<f32>(agent, arguments, new_target)
    }

    fn float64_array_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        typed_array_constructor::<f64>(agent, arguments, new_target)
    }

    /// Installs `BYTES_PER_ELEMENT` and the `prototype`/`constructor` pair
    /// of every concrete constructor.
    pub(crate) fn create_intrinsics(agent: &mut Agent) {
        for kind in TypedArrayKind::ALL {
            let intrinsics = agent.current_realm().intrinsics();
            let constructor = intrinsics.typed_array_constructor(kind);
            let prototype = intrinsics.typed_array_kind_prototype(kind);
            let bytes_per_element = Value::from(kind.element_size() as u32);

            OrdinaryObjectBuilder::new_intrinsic_function(agent, constructor)
                .with_property_capacity(2)
                .with_property(|builder| {
                    builder
                        .with_key_from_str("BYTES_PER_ELEMENT")
                        .with_value_readonly(bytes_per_element)
                        .with_enumerable(false)
                        .with_configurable(false)
                        .build()
                })
                .with_prototype_property(prototype.into_object())
                .build();

            OrdinaryObjectBuilder::new_intrinsic_object(agent, prototype)
                .with_property_capacity(2)
                .with_property(|builder| {
                    builder
                        .with_key_from_str("BYTES_PER_ELEMENT")
                        .with_value_readonly(bytes_per_element)
                        .with_enumerable(false)
                        .with_configurable(false)
                        .build()
                })
                .with_constructor_property(constructor)
                .build();
        }
    }
}

/// ### [23.2.5.1 TypedArray ( ...args )](https://tc39.es/ecma262/#sec-typedarray)
fn typed_array_constructor<T: Viewable>(
    agent: &mut Agent,
    arguments: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    let kind = T::KIND;
    // 1. If NewTarget is undefined, throw a TypeError exception.
    // A direct call constructs exactly like `new` with this constructor.
    let new_target = new_target.unwrap_or_else(|| {
        agent
            .current_realm()
            .intrinsics()
            .typed_array_constructor(kind)
            .into_object()
    });
    // 2. Let constructorName be the String value of the Constructor Name
    //    value specified in Table 71 for this TypedArray constructor.
    // 3. Let proto be "%TypedArray.prototype%".
    // 4. Let numberOfArgs be the number of elements in args.
    // 5. If numberOfArgs = 0, then
    if arguments.is_empty() {
        if kind.element_size() > 1 {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "A length or source argument is required",
            ));
        }
        // a. Return ? AllocateTypedArray(constructorName, NewTarget, proto, 0).
        let proto = get_typed_array_prototype(agent, kind, new_target)?;
        return allocate_typed_array(agent, kind, proto, 0).map(TypedArray::into_value);
    }
    // 6. Else,
    //    a. Let firstArgument be args[0].
    let first_argument = arguments.get(0);
    //    b. If firstArgument is an Object, then
    if let Ok(first_argument) = Object::try_from(first_argument) {
        // i. Let O be ? AllocateTypedArray(constructorName, NewTarget, proto).
        let proto = get_typed_array_prototype(agent, kind, new_target)?;
        let o = if let Some(src_array) = first_argument.as_typed_array() {
            // ii. If firstArgument has a [[TypedArrayName]] internal slot, then
            //     1. Perform ? InitializeTypedArrayFromTypedArray(O, firstArgument).
            initialize_typed_array_from_typed_array(agent, kind, proto, src_array)?
        } else if let Object::ArrayBuffer(buffer) = first_argument {
            // iii. Else if firstArgument has an [[ArrayBufferData]] internal slot, then
            //      1. If numberOfArgs > 1, let byteOffset be args[1]; else let byteOffset be undefined.
            //      2. If numberOfArgs > 2, let length be args[2]; else let length be undefined.
            //      3. Perform ? InitializeTypedArrayFromArrayBuffer(O, firstArgument, byteOffset, length).
            let byte_offset = arguments.get(1);
            let length = arguments.get(2);
            initialize_typed_array_from_array_buffer(agent, kind, proto, buffer, byte_offset, length)?
        } else {
            // iv. Else,
            //     5. Else,
            //        b. Perform ? InitializeTypedArrayFromArrayLike(O, firstArgument).
            initialize_typed_array_from_array_like(agent, kind, proto, first_argument)?
        };
        // v. Return O.
        return Ok(o.into_value());
    }
    //    c. Else,
    //       i. Assert: firstArgument is not an Object.
    //       ii. Let elementLength be ? ToIndex(firstArgument).
    let element_length = to_length(agent, first_argument)?;
    //       iii. Return ? AllocateTypedArray(constructorName, NewTarget, proto, elementLength).
    let proto = get_typed_array_prototype(agent, kind, new_target)?;
    allocate_typed_array(agent, kind, proto, element_length).map(TypedArray::into_value)
}
