mod data;
mod internal_methods;
mod internal_slots;
mod property_key;
mod property_storage;

use std::ops::{Index, IndexMut};

pub(crate) use data::ObjectHeapData;
pub use internal_methods::InternalMethods;
pub use internal_slots::InternalSlots;
pub(crate) use property_key::parse_string_to_integer_property_key;
pub use property_key::PropertyKey;
pub(crate) use property_storage::{PropertyEntry, PropertyStorage};

use super::Value;
use crate::{
    ecmascript::{
        builtins::{
            array::Array,
            array_buffer::ArrayBuffer,
            builtin_function::BuiltinFunction,
            error::Error,
            typed_array::TypedArray,
        },
        execution::{Agent, JsResult, ProtoIntrinsics},
        types::PropertyDescriptor,
    },
    heap::indexes::{ObjectIndex, TypedArrayIndex},
};

/// ### [10.1 Ordinary Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrdinaryObject(ObjectIndex);

impl OrdinaryObject {
    pub(crate) fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub fn into_value(self) -> Value {
        self.into()
    }

    pub fn into_object(self) -> Object {
        self.into()
    }
}

impl From<ObjectIndex> for OrdinaryObject {
    fn from(value: ObjectIndex) -> Self {
        OrdinaryObject(value)
    }
}

impl From<OrdinaryObject> for Object {
    fn from(value: OrdinaryObject) -> Self {
        Self::Object(value)
    }
}

impl From<OrdinaryObject> for Value {
    fn from(value: OrdinaryObject) -> Self {
        Self::Object(value)
    }
}

impl Index<OrdinaryObject> for Agent {
    type Output = ObjectHeapData;

    fn index(&self, index: OrdinaryObject) -> &Self::Output {
        &self.heap.objects[index.get_index()]
    }
}

impl IndexMut<OrdinaryObject> for Agent {
    fn index_mut(&mut self, index: OrdinaryObject) -> &mut Self::Output {
        &mut self.heap.objects[index.get_index()]
    }
}

impl InternalSlots for OrdinaryObject {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Object;

    #[inline(always)]
    fn get_backing_object(self, _: &Agent) -> Option<OrdinaryObject> {
        Some(self)
    }

    fn set_backing_object(self, _: &mut Agent, _: OrdinaryObject) {
        unreachable!("an ordinary object is its own backing object");
    }

    fn create_backing_object(self, _: &mut Agent) -> OrdinaryObject {
        self
    }

    fn internal_extensible(self, agent: &Agent) -> bool {
        agent[self].extensible
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        agent[self].prototype
    }

    fn internal_set_prototype(self, agent: &mut Agent, prototype: Option<Object>) {
        agent[self].prototype = prototype;
    }
}

impl InternalMethods for OrdinaryObject {}

/// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Object {
    Object(OrdinaryObject),
    Array(Array),
    ArrayBuffer(ArrayBuffer),
    BuiltinFunction(BuiltinFunction),
    Error(Error),
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

impl Object {
    pub fn into_value(self) -> Value {
        self.into()
    }

    /// The typed array behind this object, if it is one.
    pub fn as_typed_array(self) -> Option<TypedArray> {
        TypedArray::try_from(self).ok()
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        match value {
            Object::Object(data) => Value::Object(data),
            Object::Array(data) => Value::Array(data),
            Object::ArrayBuffer(data) => Value::ArrayBuffer(data),
            Object::BuiltinFunction(data) => Value::BuiltinFunction(data),
            Object::Error(data) => Value::Error(data),
            Object::Int8Array(data) => Value::Int8Array(data),
            Object::Uint8Array(data) => Value::Uint8Array(data),
            Object::Uint8ClampedArray(data) => Value::Uint8ClampedArray(data),
            Object::Int16Array(data) => Value::Int16Array(data),
            Object::Uint16Array(data) => Value::Uint16Array(data),
            Object::Int32Array(data) => Value::Int32Array(data),
            Object::Uint32Array(data) => Value::Uint32Array(data),
            Object::Float32Array(data) => Value::Float32Array(data),
            Object::Float64Array(data) => Value::Float64Array(data),
        }
    }
}

impl TryFrom<Value> for Object {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::Undefined
            | Value::Null
            | Value::Boolean(_)
            | Value::String(_)
            | Value::Integer(_)
            | Value::Number(_) => Err(()),
            Value::Object(x) => Ok(Object::Object(x)),
            Value::Array(x) => Ok(Object::Array(x)),
            Value::ArrayBuffer(x) => Ok(Object::ArrayBuffer(x)),
            Value::BuiltinFunction(x) => Ok(Object::BuiltinFunction(x)),
            Value::Error(x) => Ok(Object::Error(x)),
            Value::Int8Array(x) => Ok(Object::Int8Array(x)),
            Value::Uint8Array(x) => Ok(Object::Uint8Array(x)),
            Value::Uint8ClampedArray(x) => Ok(Object::Uint8ClampedArray(x)),
            Value::Int16Array(x) => Ok(Object::Int16Array(x)),
            Value::Uint16Array(x) => Ok(Object::Uint16Array(x)),
            Value::Int32Array(x) => Ok(Object::Int32Array(x)),
            Value::Uint32Array(x) => Ok(Object::Uint32Array(x)),
            Value::Float32Array(x) => Ok(Object::Float32Array(x)),
            Value::Float64Array(x) => Ok(Object::Float64Array(x)),
        }
    }
}

/// Forwards an internal slot or method call to the concrete object type.
macro_rules! dispatch {
    ($object:expr, $method:ident($($arg:expr),*)) => {
        match $object {
            Object::Object(data) => data.$method($($arg),*),
            Object::Array(data) => data.$method($($arg),*),
            Object::ArrayBuffer(data) => data.$method($($arg),*),
            Object::BuiltinFunction(data) => data.$method($($arg),*),
            Object::Error(data) => data.$method($($arg),*),
            Object::Int8Array(data) => TypedArray::Int8Array(data).$method($($arg),*),
            Object::Uint8Array(data) => TypedArray::Uint8Array(data).$method($($arg),*),
            Object::Uint8ClampedArray(data) => {
                TypedArray::Uint8ClampedArray(data).$method($($arg),*)
            }
            Object::Int16Array(data) => TypedArray::Int16Array(data).$method($($arg),*),
            Object::Uint16Array(data) => TypedArray::Uint16Array(data).$method($($arg),*),
            Object::Int32Array(data) => TypedArray::Int32Array(data).$method($($arg),*),
            Object::Uint32Array(data) => TypedArray::Uint32Array(data).$method($($arg),*),
            Object::Float32Array(data) => TypedArray::Float32Array(data).$method($($arg),*),
            Object::Float64Array(data) => TypedArray::Float64Array(data).$method($($arg),*),
        }
    };
}

impl InternalSlots for Object {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Object;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        dispatch!(self, get_backing_object(agent))
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        dispatch!(self, set_backing_object(agent, backing_object))
    }

    fn create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        dispatch!(self, create_backing_object(agent))
    }

    fn internal_extensible(self, agent: &Agent) -> bool {
        dispatch!(self, internal_extensible(agent))
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        dispatch!(self, internal_prototype(agent))
    }

    fn internal_set_prototype(self, agent: &mut Agent, prototype: Option<Object>) {
        dispatch!(self, internal_set_prototype(agent, prototype))
    }
}

impl InternalMethods for Object {
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        dispatch!(self, internal_get_prototype_of(agent))
    }

    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        dispatch!(self, internal_get_own_property(agent, property_key))
    }

    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        dispatch!(
            self,
            internal_define_own_property(agent, property_key, property_descriptor)
        )
    }

    fn internal_has_property(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        dispatch!(self, internal_has_property(agent, property_key))
    }

    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        dispatch!(self, internal_get(agent, property_key, receiver))
    }

    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        dispatch!(self, internal_set(agent, property_key, value, receiver))
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        dispatch!(self, internal_delete(agent, property_key))
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        dispatch!(self, internal_own_property_keys(agent))
    }
}

impl From<TypedArray> for Object {
    fn from(value: TypedArray) -> Self {
        match value {
            TypedArray::Int8Array(idx) => Object::Int8Array(idx),
            TypedArray::Uint8Array(idx) => Object::Uint8Array(idx),
            TypedArray::Uint8ClampedArray(idx) => Object::Uint8ClampedArray(idx),
            TypedArray::Int16Array(idx) => Object::Int16Array(idx),
            TypedArray::Uint16Array(idx) => Object::Uint16Array(idx),
            TypedArray::Int32Array(idx) => Object::Int32Array(idx),
            TypedArray::Uint32Array(idx) => Object::Uint32Array(idx),
            TypedArray::Float32Array(idx) => Object::Float32Array(idx),
            TypedArray::Float64Array(idx) => Object::Float64Array(idx),
        }
    }
}

impl TryFrom<Object> for TypedArray {
    type Error = ();

    fn try_from(value: Object) -> Result<Self, ()> {
        match value {
            Object::Int8Array(idx) => Ok(TypedArray::Int8Array(idx)),
            Object::Uint8Array(idx) => Ok(TypedArray::Uint8Array(idx)),
            Object::Uint8ClampedArray(idx) => Ok(TypedArray::Uint8ClampedArray(idx)),
            Object::Int16Array(idx) => Ok(TypedArray::Int16Array(idx)),
            Object::Uint16Array(idx) => Ok(TypedArray::Uint16Array(idx)),
            Object::Int32Array(idx) => Ok(TypedArray::Int32Array(idx)),
            Object::Uint32Array(idx) => Ok(TypedArray::Uint32Array(idx)),
            Object::Float32Array(idx) => Ok(TypedArray::Float32Array(idx)),
            Object::Float64Array(idx) => Ok(TypedArray::Float64Array(idx)),
            _ => Err(()),
        }
    }
}
