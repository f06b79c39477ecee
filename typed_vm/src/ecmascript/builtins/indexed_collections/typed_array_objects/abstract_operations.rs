// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::trace;

use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{get, length_of_array_like, set},
            type_conversion::{to_integer_or_infinity, to_number},
        },
        builtins::{
            ArrayBuffer, TypedArray, TypedArrayKind, array_buffer::allocate_array_buffer,
            ordinary::get_prototype_from_constructor, typed_array::data::TypedArrayHeapData,
        },
        execution::{Agent, JsResult, agent::ExceptionType},
        types::{InternalSlots, Object, PropertyKey, Value},
    },
    heap::indexes::TypedArrayIndex,
};

/// ### [23.2.4.4 ValidateTypedArray ( O, order )](https://tc39.es/ecma262/#sec-validatetypedarray)
///
/// Only the RequireInternalSlot part applies: buffers never detach or
/// resize.
pub(crate) fn require_internal_slot_typed_array(
    agent: &mut Agent,
    o: Value,
) -> JsResult<TypedArray> {
    // 1. Perform ? RequireInternalSlot(O, [[TypedArrayName]]).
    match TypedArray::try_from(o) {
        Ok(typed_array) => Ok(typed_array),
        Err(()) => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Expected this to be a TypedArray",
        )),
    }
}

/// Creates the view object over `buffer`. `prototype` is `None` when the
/// kind's intrinsic prototype applies.
pub(crate) fn create_typed_array(
    agent: &mut Agent,
    kind: TypedArrayKind,
    prototype: Option<Object>,
    buffer: ArrayBuffer,
    byte_offset: usize,
    array_length: usize,
) -> TypedArray {
    let byte_length = array_length * kind.element_size();
    debug_assert!(byte_offset + byte_length <= buffer.byte_length(agent));
    debug_assert!(byte_offset % kind.element_size() == 0);
    agent.heap.typed_arrays.push(TypedArrayHeapData {
        object_index: None,
        viewed_array_buffer: buffer,
        byte_length,
        byte_offset,
        array_length,
    });
    let o = TypedArray::new(kind, TypedArrayIndex::last(&agent.heap.typed_arrays));
    if prototype.is_some() {
        o.internal_set_prototype(agent, prototype);
    }
    trace!(
        kind = kind.name(),
        ?buffer,
        byte_offset,
        array_length,
        "created typed array"
    );
    o
}

/// ### [23.2.5.1.1 AllocateTypedArray ( constructorName, newTarget, defaultProto \[ , length \] )](https://tc39.es/ecma262/#sec-allocatetypedarray)
///
/// The prototype half of AllocateTypedArray: the view object itself is
/// only created once its buffer is known.
pub(crate) fn get_typed_array_prototype(
    agent: &mut Agent,
    kind: TypedArrayKind,
    new_target: Object,
) -> JsResult<Option<Object>> {
    // 1. Let proto be ? GetPrototypeFromConstructor(newTarget, defaultProto).
    get_prototype_from_constructor(agent, new_target, kind.into())
}

/// ### [23.2.5.1.1 AllocateTypedArray ( constructorName, newTarget, defaultProto, length )](https://tc39.es/ecma262/#sec-allocatetypedarray)
///
/// A view of `length` elements over a fresh buffer.
pub(crate) fn allocate_typed_array(
    agent: &mut Agent,
    kind: TypedArrayKind,
    prototype: Option<Object>,
    length: u64,
) -> JsResult<TypedArray> {
    // 7. Else,
    //    a. Perform ? AllocateTypedArrayBuffer(obj, length).
    let data = allocate_typed_array_buffer(agent, kind, length)?;
    Ok(create_typed_array(
        agent,
        kind,
        prototype,
        data,
        0,
        length as usize,
    ))
}

/// ### [23.2.5.1.6 AllocateTypedArrayBuffer ( O, length )](https://tc39.es/ecma262/#sec-allocatetypedarraybuffer)
pub(crate) fn allocate_typed_array_buffer(
    agent: &mut Agent,
    kind: TypedArrayKind,
    length: u64,
) -> JsResult<ArrayBuffer> {
    // 3. Let elementSize be TypedArrayElementSize(O).
    // 4. Let byteLength be elementSize × length.
    // Saturating keeps an absurd length a RangeError in CreateByteDataBlock.
    let byte_length = length.saturating_mul(kind.element_size() as u64);
    // 5. Let data be ? AllocateArrayBuffer(%ArrayBuffer%, byteLength).
    let array_buffer_constructor = agent.current_realm().intrinsics().array_buffer();
    allocate_array_buffer(agent, array_buffer_constructor.into(), byte_length)
}

/// ### [23.2.5.1.2 InitializeTypedArrayFromTypedArray ( O, srcArray )](https://tc39.es/ecma262/#sec-initializetypedarrayfromtypedarray)
///
/// Copies the decoded values of `src_array` into a new buffer, converting
/// them to `kind` on the way.
pub(crate) fn initialize_typed_array_from_typed_array(
    agent: &mut Agent,
    kind: TypedArrayKind,
    prototype: Option<Object>,
    src_array: TypedArray,
) -> JsResult<TypedArray> {
    // 6. Let elementLength be TypedArrayLength(srcRecord).
    let element_length = src_array.array_length(agent);
    // 9. Let data be ? AllocateArrayBuffer(%ArrayBuffer%, byteLength).
    let data = allocate_typed_array_buffer(agent, kind, element_length as u64)?;
    let o = create_typed_array(agent, kind, prototype, data, 0, element_length);
    // 11. Else,
    //     d. Repeat, while targetByteIndex < limit,
    //        i. Let value be GetValueFromBuffer(srcData, srcByteIndex, srcType, true, UNORDERED).
    //        ii. Perform SetValueInBuffer(data, targetByteIndex, elementType, value, true, UNORDERED).
    for index in 0..element_length {
        if let Some(value) = src_array.get_element(agent, index) {
            o.set_element(agent, index, value);
        }
    }
    Ok(o)
}

/// ### [23.2.5.1.3 InitializeTypedArrayFromArrayBuffer ( O, buffer, byteOffset, length )](https://tc39.es/ecma262/#sec-initializetypedarrayfromarraybuffer)
pub(crate) fn initialize_typed_array_from_array_buffer(
    agent: &mut Agent,
    kind: TypedArrayKind,
    prototype: Option<Object>,
    buffer: ArrayBuffer,
    byte_offset: Value,
    length: Value,
) -> JsResult<TypedArray> {
    // 1. Let elementSize be TypedArrayElementSize(O).
    let element_size = kind.element_size() as f64;
    // 2. Let offset be ? ToIndex(byteOffset).
    let offset = to_integer_or_infinity(agent, byte_offset)?;
    if offset < 0.0 {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "Start offset is negative",
        ));
    }
    // 3. If offset modulo elementSize ≠ 0, throw a RangeError exception.
    if offset % element_size != 0.0 {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "Start offset is not a multiple of the element size",
        ));
    }
    // 5. If length is not undefined, then
    //    a. Let newLength be ? ToIndex(length).
    let new_length = if length.is_undefined() {
        None
    } else {
        let new_length = to_integer_or_infinity(agent, length)?;
        if new_length < 0.0 {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::RangeError,
                "Invalid typed array length",
            ));
        }
        Some(new_length)
    };
    // 8. Let bufferByteLength be ArrayBufferByteLength(buffer, SEQ-CST).
    let buffer_byte_length = buffer.byte_length(agent) as f64;
    let new_byte_length = match new_length {
        // 10. Else,
        //     a. If length is undefined, then
        None => {
            // i. If bufferByteLength modulo elementSize ≠ 0, throw a RangeError exception.
            if buffer_byte_length % element_size != 0.0 {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::RangeError,
                    "Byte length of the buffer is not a multiple of the element size",
                ));
            }
            // ii. Let newByteLength be bufferByteLength - offset.
            // iii. If newByteLength < 0, throw a RangeError exception.
            if offset > buffer_byte_length {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::RangeError,
                    "Start offset is outside the bounds of the buffer",
                ));
            }
            buffer_byte_length - offset
        }
        //     b. Else,
        Some(new_length) => {
            // i. Let newByteLength be newLength × elementSize.
            let new_byte_length = new_length * element_size;
            // ii. If offset + newByteLength > bufferByteLength, throw a RangeError exception.
            if offset + new_byte_length > buffer_byte_length {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::RangeError,
                    "Invalid typed array length",
                ));
            }
            new_byte_length
        }
    };
    // 11. Set O.[[ViewedArrayBuffer]] to buffer.
    // 12. Set O.[[ByteLength]] to newByteLength.
    // 13. Set O.[[ByteOffset]] to offset.
    // 14. Set O.[[ArrayLength]] to newByteLength / elementSize.
    let array_length = (new_byte_length / element_size) as usize;
    Ok(create_typed_array(
        agent,
        kind,
        prototype,
        buffer,
        offset as usize,
        array_length,
    ))
}

/// ### [23.2.5.1.5 InitializeTypedArrayFromArrayLike ( O, arrayLike )](https://tc39.es/ecma262/#sec-initializetypedarrayfromarraylike)
pub(crate) fn initialize_typed_array_from_array_like(
    agent: &mut Agent,
    kind: TypedArrayKind,
    prototype: Option<Object>,
    array_like: Object,
) -> JsResult<TypedArray> {
    // 1. Let len be ? LengthOfArrayLike(arrayLike).
    let len = length_of_array_like(agent, array_like)?;
    // 2. Perform ? AllocateTypedArrayBuffer(O, len).
    let o = allocate_typed_array(agent, kind, prototype, len)?;
    // 3. Let k be 0.
    // 4. Repeat, while k < len,
    for k in 0..len {
        // a. Let Pk be ! ToString(𝔽(k)).
        let pk = PropertyKey::Integer(k as i64);
        // b. Let kValue be ? Get(arrayLike, Pk).
        let k_value = get(agent, array_like, pk)?;
        // c. Perform ? Set(O, Pk, kValue, true).
        set(agent, o, pk, k_value, true)?;
    }
    // 5. Return UNUSED.
    Ok(o)
}

/// ### [10.4.5.15 TypedArrayGetElement ( O, index )](https://tc39.es/ecma262/#sec-typedarraygetelement)
pub(crate) fn typed_array_get_element(agent: &Agent, o: TypedArray, index: f64) -> Value {
    // 1. If IsValidIntegerIndex(O, index) is false, return undefined.
    // 2. Let offset be O.[[ByteOffset]].
    // 3. Let elementSize be TypedArrayElementSize(O).
    // 4. Let byteIndexInBuffer be (ℝ(index) × elementSize) + offset.
    // 5. Let elementType be TypedArrayElementType(O).
    // 6. Return GetValueFromBuffer(O.[[ViewedArrayBuffer]], byteIndexInBuffer, elementType, true, UNORDERED).
    o.is_valid_integer_index(agent, index)
        .and_then(|index| o.get_element(agent, index))
        .map_or(Value::Undefined, Value::from_f64)
}

/// ### [10.4.5.16 TypedArraySetElement ( O, index, value )](https://tc39.es/ecma262/#sec-typedarraysetelement)
///
/// The value is always coerced, even when the write is then dropped.
pub(crate) fn typed_array_set_element(
    agent: &mut Agent,
    o: TypedArray,
    index: f64,
    value: Value,
) -> JsResult<()> {
    // 1. If O.[[ContentType]] is BIGINT, let numValue be ? ToBigInt(value).
    // 2. Otherwise, let numValue be ? ToNumber(value).
    let num_value = to_number(agent, value)?;
    // 3. If IsValidIntegerIndex(O, index) is true, then
    if let Some(index) = o.is_valid_integer_index(agent, index) {
        // d. Perform SetValueInBuffer(O.[[ViewedArrayBuffer]], byteIndexInBuffer, elementType, numValue, true, UNORDERED).
        o.set_element(agent, index, num_value);
    }
    // 4. Return UNUSED.
    Ok(())
}
