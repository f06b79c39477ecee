// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.4.5 TypedArray Exotic Objects](https://tc39.es/ecma262/#sec-typedarray-exotic-objects)

pub mod data;

use std::ops::{Index, IndexMut};

use self::data::TypedArrayHeapData;
use super::{
    ArrayBuffer,
    indexed_collections::typed_array_objects::abstract_operations::{
        typed_array_get_element, typed_array_set_element,
    },
    ordinary::{
        ordinary_define_own_property, ordinary_delete, ordinary_get, ordinary_get_own_property,
        ordinary_has_property, ordinary_own_property_keys, ordinary_set,
    },
};
use crate::{
    ecmascript::{
        abstract_operations::type_conversion::canonical_numeric_index_string,
        execution::{Agent, JsResult, ProtoIntrinsics},
        types::{
            DataBlock, InternalMethods, InternalSlots, Object, OrdinaryObject,
            PropertyDescriptor, PropertyKey, U8Clamped, Value, Viewable,
        },
    },
    heap::indexes::TypedArrayIndex,
};

/// ### [Table 71: The TypedArray Constructors](https://tc39.es/ecma262/#table-the-typedarray-constructors)
///
/// Element kinds, in the order their intrinsics are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

fn read_element<T: Viewable>(block: &DataBlock, byte_index: usize) -> Option<f64> {
    block.get::<T>(byte_index).map(Viewable::into_f64)
}

fn write_element<T: Viewable>(block: &mut DataBlock, byte_index: usize, value: f64) {
    block.set(byte_index, T::from_f64(value));
}

impl TypedArrayKind {
    pub const ALL: [TypedArrayKind; 9] = [
        TypedArrayKind::Int8,
        TypedArrayKind::Uint8,
        TypedArrayKind::Uint8Clamped,
        TypedArrayKind::Int16,
        TypedArrayKind::Uint16,
        TypedArrayKind::Int32,
        TypedArrayKind::Uint32,
        TypedArrayKind::Float32,
        TypedArrayKind::Float64,
    ];

    /// The Element Size column of Table 71.
    pub const fn element_size(self) -> usize {
        match self {
            TypedArrayKind::Int8 | TypedArrayKind::Uint8 | TypedArrayKind::Uint8Clamped => 1,
            TypedArrayKind::Int16 | TypedArrayKind::Uint16 => 2,
            TypedArrayKind::Int32 | TypedArrayKind::Uint32 | TypedArrayKind::Float32 => 4,
            TypedArrayKind::Float64 => 8,
        }
    }

    /// Name of the constructor, eg. `"Uint8ClampedArray"`.
    pub const fn name(self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Uint8Clamped => "Uint8ClampedArray",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
        }
    }

    /// ### [25.1.3.15 GetValueFromBuffer ( arrayBuffer, byteIndex, type, isTypedArray, order \[ , isLittleEndian \] )](https://tc39.es/ecma262/#sec-getvaluefrombuffer)
    ///
    /// Decodes the element at `byte_index`, or `None` if it does not fit
    /// in the block.
    pub(crate) fn get_value_from_block(self, block: &DataBlock, byte_index: usize) -> Option<f64> {
        match self {
            TypedArrayKind::Int8 => read_element::<i8>(block, byte_index),
            TypedArrayKind::Uint8 => read_element::<u8>(block, byte_index),
            TypedArrayKind::Uint8Clamped => read_element::<U8Clamped>(block, byte_index),
            TypedArrayKind::Int16 => read_element::<i16>(block, byte_index),
            TypedArrayKind::Uint16 => read_element::<u16>(block, byte_index),
            TypedArrayKind::Int32 => read_element::<i32>(block, byte_index),
            TypedArrayKind::Uint32 => read_element::<u32>(block, byte_index),
            TypedArrayKind::Float32 => read_element::<f32>(block, byte_index),
            TypedArrayKind::Float64 => read_element::<f64>(block, byte_index),
        }
    }

    /// ### [25.1.3.17 SetValueInBuffer ( arrayBuffer, byteIndex, type, value, isTypedArray, order \[ , isLittleEndian \] )](https://tc39.es/ecma262/#sec-setvalueinbuffer)
    ///
    /// Encodes the already coerced Number `value` at `byte_index`.
    pub(crate) fn set_value_in_block(self, block: &mut DataBlock, byte_index: usize, value: f64) {
        match self {
            TypedArrayKind::Int8 => write_element::<i8>(block, byte_index, value),
            TypedArrayKind::Uint8 => write_element::<u8>(block, byte_index, value),
            TypedArrayKind::Uint8Clamped => write_element::<U8Clamped>(block, byte_index, value),
            TypedArrayKind::Int16 => write_element::<i16>(block, byte_index, value),
            TypedArrayKind::Uint16 => write_element::<u16>(block, byte_index, value),
            TypedArrayKind::Int32 => write_element::<i32>(block, byte_index, value),
            TypedArrayKind::Uint32 => write_element::<u32>(block, byte_index, value),
            TypedArrayKind::Float32 => write_element::<f32>(block, byte_index, value),
            TypedArrayKind::Float64 => write_element::<f64>(block, byte_index, value),
        }
    }
}

/// ### [23.2 TypedArray Objects](https://tc39.es/ecma262/#sec-typedarray-objects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArray {
    Int8Array(TypedArrayIndex),
    Uint8Array(TypedArrayIndex),
    Uint8ClampedArray(TypedArrayIndex),
    Int16Array(TypedArrayIndex),
    Uint16Array(TypedArrayIndex),
    Int32Array(TypedArrayIndex),
    Uint32Array(TypedArrayIndex),
    Float32Array(TypedArrayIndex),
    Float64Array(TypedArrayIndex),
}

impl TypedArray {
    pub(crate) fn new(kind: TypedArrayKind, index: TypedArrayIndex) -> Self {
        match kind {
            TypedArrayKind::Int8 => TypedArray::Int8Array(index),
            TypedArrayKind::Uint8 => TypedArray::Uint8Array(index),
            TypedArrayKind::Uint8Clamped => TypedArray::Uint8ClampedArray(index),
            TypedArrayKind::Int16 => TypedArray::Int16Array(index),
            TypedArrayKind::Uint16 => TypedArray::Uint16Array(index),
            TypedArrayKind::Int32 => TypedArray::Int32Array(index),
            TypedArrayKind::Uint32 => TypedArray::Uint32Array(index),
            TypedArrayKind::Float32 => TypedArray::Float32Array(index),
            TypedArrayKind::Float64 => TypedArray::Float64Array(index),
        }
    }

    pub(crate) fn get_index(self) -> usize {
        match self {
            TypedArray::Int8Array(index)
            | TypedArray::Uint8Array(index)
            | TypedArray::Uint8ClampedArray(index)
            | TypedArray::Int16Array(index)
            | TypedArray::Uint16Array(index)
            | TypedArray::Int32Array(index)
            | TypedArray::Uint32Array(index)
            | TypedArray::Float32Array(index)
            | TypedArray::Float64Array(index) => index.into_index(),
        }
    }

    /// ### \[\[TypedArrayName\]\]
    pub fn kind(self) -> TypedArrayKind {
        match self {
            TypedArray::Int8Array(_) => TypedArrayKind::Int8,
            TypedArray::Uint8Array(_) => TypedArrayKind::Uint8,
            TypedArray::Uint8ClampedArray(_) => TypedArrayKind::Uint8Clamped,
            TypedArray::Int16Array(_) => TypedArrayKind::Int16,
            TypedArray::Uint16Array(_) => TypedArrayKind::Uint16,
            TypedArray::Int32Array(_) => TypedArrayKind::Int32,
            TypedArray::Uint32Array(_) => TypedArrayKind::Uint32,
            TypedArray::Float32Array(_) => TypedArrayKind::Float32,
            TypedArray::Float64Array(_) => TypedArrayKind::Float64,
        }
    }

    #[inline]
    pub fn element_size(self) -> usize {
        self.kind().element_size()
    }

    /// \[\[ViewedArrayBuffer\]\]
    #[inline]
    pub fn viewed_array_buffer(self, agent: &Agent) -> ArrayBuffer {
        agent[self].viewed_array_buffer
    }

    /// \[\[ByteLength\]\]
    #[inline]
    pub fn byte_length(self, agent: &Agent) -> usize {
        agent[self].byte_length
    }

    /// \[\[ByteOffset\]\]
    #[inline]
    pub fn byte_offset(self, agent: &Agent) -> usize {
        agent[self].byte_offset
    }

    /// \[\[ArrayLength\]\]
    #[inline]
    pub fn array_length(self, agent: &Agent) -> usize {
        agent[self].array_length
    }

    /// ### [10.4.5.14 IsValidIntegerIndex ( O, index )](https://tc39.es/ecma262/#sec-isvalidintegerindex)
    ///
    /// Returns the element index that `index` names, if any.
    pub(crate) fn is_valid_integer_index(self, agent: &Agent, index: f64) -> Option<usize> {
        // 1. If IsDetachedBuffer(O.[[ViewedArrayBuffer]]) is true, return false.
        // 2. If IsIntegralNumber(index) is false, return false.
        if index.fract() != 0.0 {
            return None;
        }
        // 3. If index is -0𝔽, return false.
        if index == 0.0 && index.is_sign_negative() {
            return None;
        }
        // 6. If ℝ(index) < 0 or ℝ(index) ≥ length, return false.
        if index < 0.0 || index >= self.array_length(agent) as f64 {
            return None;
        }
        // 7. Return true.
        Some(index as usize)
    }

    /// The decoded element at `index`, or `None` past the end of the view.
    pub fn get_element(self, agent: &Agent, index: usize) -> Option<f64> {
        let data = &agent[self];
        if index >= data.array_length {
            return None;
        }
        let byte_index = data.byte_offset + index * self.element_size();
        let block = data.viewed_array_buffer.get_data_block(agent);
        self.kind().get_value_from_block(block, byte_index)
    }

    /// Encodes `value` at `index`; writes past the end of the view are
    /// dropped.
    pub(crate) fn set_element(self, agent: &mut Agent, index: usize, value: f64) {
        let data = &agent[self];
        if index >= data.array_length {
            return;
        }
        let byte_index = data.byte_offset + index * self.element_size();
        let buffer = data.viewed_array_buffer;
        self.kind()
            .set_value_in_block(buffer.get_data_block_mut(agent), byte_index, value);
    }

    pub fn into_value(self) -> Value {
        self.into()
    }

    pub fn into_object(self) -> Object {
        self.into()
    }
}

impl From<TypedArray> for Value {
    fn from(value: TypedArray) -> Self {
        match value {
            TypedArray::Int8Array(index) => Value::Int8Array(index),
            TypedArray::Uint8Array(index) => Value::Uint8Array(index),
            TypedArray::Uint8ClampedArray(index) => Value::Uint8ClampedArray(index),
            TypedArray::Int16Array(index) => Value::Int16Array(index),
            TypedArray::Uint16Array(index) => Value::Uint16Array(index),
            TypedArray::Int32Array(index) => Value::Int32Array(index),
            TypedArray::Uint32Array(index) => Value::Uint32Array(index),
            TypedArray::Float32Array(index) => Value::Float32Array(index),
            TypedArray::Float64Array(index) => Value::Float64Array(index),
        }
    }
}

impl TryFrom<Value> for TypedArray {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::Int8Array(index) => Ok(TypedArray::Int8Array(index)),
            Value::Uint8Array(index) => Ok(TypedArray::Uint8Array(index)),
            Value::Uint8ClampedArray(index) => Ok(TypedArray::Uint8ClampedArray(index)),
            Value::Int16Array(index) => Ok(TypedArray::Int16Array(index)),
            Value::Uint16Array(index) => Ok(TypedArray::Uint16Array(index)),
            Value::Int32Array(index) => Ok(TypedArray::Int32Array(index)),
            Value::Uint32Array(index) => Ok(TypedArray::Uint32Array(index)),
            Value::Float32Array(index) => Ok(TypedArray::Float32Array(index)),
            Value::Float64Array(index) => Ok(TypedArray::Float64Array(index)),
            _ => Err(()),
        }
    }
}

impl Index<TypedArray> for Agent {
    type Output = TypedArrayHeapData;

    fn index(&self, index: TypedArray) -> &Self::Output {
        &self.heap.typed_arrays[index.get_index()]
    }
}

impl IndexMut<TypedArray> for Agent {
    fn index_mut(&mut self, index: TypedArray) -> &mut Self::Output {
        &mut self.heap.typed_arrays[index.get_index()]
    }
}

impl InternalSlots for TypedArray {
    /// Unused: the default prototype depends on the element kind, see
    /// [`TypedArray::internal_prototype`].
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::TypedArray;

    #[inline(always)]
    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        match self.get_backing_object(agent) {
            Some(backing_object) => backing_object.internal_prototype(agent),
            None => Some(
                agent
                    .current_realm()
                    .intrinsics()
                    .get_intrinsic_default_proto(self.kind().into()),
            ),
        }
    }
}

fn element_descriptor(value: Value) -> PropertyDescriptor {
    PropertyDescriptor {
        value: Some(value),
        writable: Some(true),
        enumerable: Some(true),
        configurable: Some(true),
        ..Default::default()
    }
}

impl InternalMethods for TypedArray {
    /// ### [10.4.5.1 \[\[GetOwnProperty\]\] ( P )](https://tc39.es/ecma262/#sec-typedarray-getownproperty)
    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        // 1. If P is a String, then
        //    a. Let numericIndex be CanonicalNumericIndexString(P).
        //    b. If numericIndex is not undefined, then
        if let Some(numeric_index) = canonical_numeric_index_string(agent, property_key) {
            // i. Let value be TypedArrayGetElement(O, numericIndex).
            let value = typed_array_get_element(agent, self, numeric_index);
            // ii. If value is undefined, return undefined.
            // iii. Return the PropertyDescriptor { [[Value]]: value,
            //      [[Writable]]: true, [[Enumerable]]: true,
            //      [[Configurable]]: true }.
            return Ok((!value.is_undefined()).then(|| element_descriptor(value)));
        }
        // 2. Return OrdinaryGetOwnProperty(O, P).
        Ok(self.get_backing_object(agent).and_then(|backing_object| {
            ordinary_get_own_property(agent, backing_object, property_key)
        }))
    }

    /// ### [10.4.5.2 \[\[HasProperty\]\] ( P )](https://tc39.es/ecma262/#sec-typedarray-hasproperty)
    fn internal_has_property(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        // 1. If P is a String, then
        //    a. Let numericIndex be CanonicalNumericIndexString(P).
        //    b. If numericIndex is not undefined, return IsValidIntegerIndex(O, numericIndex).
        if let Some(numeric_index) = canonical_numeric_index_string(agent, property_key) {
            return Ok(self.is_valid_integer_index(agent, numeric_index).is_some());
        }
        // 2. Return ? OrdinaryHasProperty(O, P).
        ordinary_has_property(agent, self.into(), property_key)
    }

    /// ### [10.4.5.3 \[\[DefineOwnProperty\]\] ( P, Desc )](https://tc39.es/ecma262/#sec-typedarray-defineownproperty)
    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        // 1. If P is a String, then
        //    a. Let numericIndex be CanonicalNumericIndexString(P).
        //    b. If numericIndex is not undefined, then
        if let Some(numeric_index) = canonical_numeric_index_string(agent, property_key) {
            // i. If IsValidIntegerIndex(O, numericIndex) is false, return false.
            if self.is_valid_integer_index(agent, numeric_index).is_none() {
                return Ok(false);
            }
            // ii. If Desc has a [[Configurable]] field and Desc.[[Configurable]] is false, return false.
            // iii. If Desc has an [[Enumerable]] field and Desc.[[Enumerable]] is false, return false.
            // iv. If IsAccessorDescriptor(Desc) is true, return false.
            // v. If Desc has a [[Writable]] field and Desc.[[Writable]] is false, return false.
            if property_descriptor.configurable == Some(false)
                || property_descriptor.enumerable == Some(false)
                || property_descriptor.is_accessor_descriptor()
                || property_descriptor.writable == Some(false)
            {
                return Ok(false);
            }
            // vi. If Desc has a [[Value]] field, perform ? TypedArraySetElement(O, numericIndex, Desc.[[Value]]).
            if let Some(value) = property_descriptor.value {
                typed_array_set_element(agent, self, numeric_index, value)?;
            }
            // vii. Return true.
            return Ok(true);
        }
        // 2. Return ! OrdinaryDefineOwnProperty(O, P, Desc).
        let backing_object = self.get_or_create_backing_object(agent);
        Ok(ordinary_define_own_property(
            agent,
            backing_object,
            property_key,
            property_descriptor,
        ))
    }

    /// ### [10.4.5.4 \[\[Get\]\] ( P, Receiver )](https://tc39.es/ecma262/#sec-typedarray-get)
    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        // 1. If P is a String, then
        //    a. Let numericIndex be CanonicalNumericIndexString(P).
        //    b. If numericIndex is not undefined, then
        if let Some(numeric_index) = canonical_numeric_index_string(agent, property_key) {
            // i. Return TypedArrayGetElement(O, numericIndex).
            return Ok(typed_array_get_element(agent, self, numeric_index));
        }
        // 2. Return ? OrdinaryGet(O, P, Receiver).
        ordinary_get(agent, self.into(), property_key, receiver)
    }

    /// ### [10.4.5.5 \[\[Set\]\] ( P, V, Receiver )](https://tc39.es/ecma262/#sec-typedarray-set)
    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        // 1. If P is a String, then
        //    a. Let numericIndex be CanonicalNumericIndexString(P).
        //    b. If numericIndex is not undefined, then
        if let Some(numeric_index) = canonical_numeric_index_string(agent, property_key) {
            // i. If SameValue(O, Receiver) is true, then
            if receiver == self.into_value() {
                // 1. Perform ? TypedArraySetElement(O, numericIndex, V).
                typed_array_set_element(agent, self, numeric_index, value)?;
                // 2. Return true.
                return Ok(true);
            }
            // ii. If IsValidIntegerIndex(O, numericIndex) is false, return true.
            if self.is_valid_integer_index(agent, numeric_index).is_none() {
                return Ok(true);
            }
        }
        // 2. Return ? OrdinarySet(O, P, V, Receiver).
        ordinary_set(agent, self.into(), property_key, value, receiver)
    }

    /// ### [10.4.5.6 \[\[Delete\]\] ( P )](https://tc39.es/ecma262/#sec-typedarray-delete)
    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        // 1. If P is a String, then
        //    a. Let numericIndex be CanonicalNumericIndexString(P).
        //    b. If numericIndex is not undefined, then
        if let Some(numeric_index) = canonical_numeric_index_string(agent, property_key) {
            // i. If IsValidIntegerIndex(O, numericIndex) is false, return true; else return false.
            return Ok(self.is_valid_integer_index(agent, numeric_index).is_none());
        }
        // 2. Return ! OrdinaryDelete(O, P).
        Ok(match self.get_backing_object(agent) {
            Some(backing_object) => ordinary_delete(agent, backing_object, property_key),
            None => true,
        })
    }

    /// ### [10.4.5.7 \[\[OwnPropertyKeys\]\] ( )](https://tc39.es/ecma262/#sec-typedarray-ownpropertykeys)
    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        // 3. If IsTypedArrayOutOfBounds(taRecord) is false, then
        //    a. Let length be TypedArrayLength(taRecord).
        //    b. For each integer i such that 0 ≤ i < length, in ascending order, do
        //       i. Append ! ToString(𝔽(i)) to keys.
        let mut keys = (0..self.array_length(agent))
            .map(PropertyKey::from)
            .collect::<Vec<_>>();
        // 4. For each own property key P of O such that P is a String and P
        //    is not an integer index, in ascending chronological order of
        //    property creation, do
        //    a. Append P to keys.
        if let Some(backing_object) = self.get_backing_object(agent) {
            keys.extend(ordinary_own_property_keys(agent, backing_object));
        }
        // 6. Return keys.
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_sizes_match_viewable_types() {
        fn check<T: Viewable>() {
            assert_eq!(T::KIND.element_size(), size_of::<T>(), "{:?}", T::KIND);
        }
        check::<i8>();
        check::<u8>();
        check::<U8Clamped>();
        check::<i16>();
        check::<u16>();
        check::<i32>();
        check::<u32>();
        check::<f32>();
        check::<f64>();
        for (index, kind) in TypedArrayKind::ALL.into_iter().enumerate() {
            assert_eq!(kind as usize, index);
        }
    }

    #[test]
    fn block_encoding_dispatch() {
        let mut block = DataBlock::new(8);
        TypedArrayKind::Int8.set_value_in_block(&mut block, 0, 0x1FA as f64);
        assert_eq!(TypedArrayKind::Int8.get_value_from_block(&block, 0), Some(-6.0));
        assert_eq!(TypedArrayKind::Uint8.get_value_from_block(&block, 0), Some(250.0));
        TypedArrayKind::Uint8Clamped.set_value_in_block(&mut block, 1, 300.0);
        assert_eq!(TypedArrayKind::Uint8.get_value_from_block(&block, 1), Some(255.0));
        TypedArrayKind::Float64.set_value_in_block(&mut block, 0, 0.1);
        assert_eq!(TypedArrayKind::Float64.get_value_from_block(&block, 0), Some(0.1));
        assert_eq!(TypedArrayKind::Float64.get_value_from_block(&block, 1), None);
    }
}
