// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### 10.4.2 Array Exotic Objects
//!
//! https://tc39.es/ecma262/#sec-array-exotic-objects
//!
//! Arrays here only serve as list sources and results: their `length` is a
//! non-writable property, so the element count is fixed at creation.
//! Elements may still be overwritten or deleted.

mod data;

use std::ops::{Index, IndexMut};

pub use data::ArrayHeapData;

use super::ordinary::{
    is_compatible_property_descriptor, ordinary_define_own_property, ordinary_delete,
    ordinary_get_own_property, ordinary_own_property_keys,
};
use crate::{
    ecmascript::{
        execution::{Agent, JsResult, ProtoIntrinsics},
        types::{
            InternalMethods, InternalSlots, Object, OrdinaryObject, PropertyDescriptor,
            PropertyKey, Value,
        },
    },
    heap::indexes::ArrayIndex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Array(ArrayIndex);

impl Array {
    pub(crate) fn get_index(self) -> usize {
        self.0.into_index()
    }

    /// Allocates an Array holding a copy of `elements`.
    pub fn from_slice(agent: &mut Agent, elements: &[Value]) -> Self {
        agent.heap.arrays.push(ArrayHeapData::from_slice(elements));
        Array(ArrayIndex::last(&agent.heap.arrays))
    }

    pub fn len(self, agent: &Agent) -> u32 {
        agent[self].elements.len() as u32
    }

    pub fn is_empty(self, agent: &Agent) -> bool {
        agent[self].elements.is_empty()
    }

    pub fn into_value(self) -> Value {
        self.into()
    }

    pub fn into_object(self) -> Object {
        self.into()
    }

    /// The element slot that `property_key` names, if it is in bounds.
    fn element_index(self, agent: &Agent, property_key: PropertyKey) -> Option<usize> {
        property_key
            .into_u32()
            .map(|index| index as usize)
            .filter(|index| *index < agent[self].elements.len())
    }

    fn length_descriptor(self, agent: &Agent) -> PropertyDescriptor {
        PropertyDescriptor {
            value: Some(Value::from(self.len(agent))),
            writable: Some(false),
            enumerable: Some(false),
            configurable: Some(false),
            ..Default::default()
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

impl From<ArrayIndex> for Array {
    fn from(value: ArrayIndex) -> Self {
        Array(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Array> for Object {
    fn from(value: Array) -> Self {
        Object::Array(value)
    }
}

impl TryFrom<Value> for Array {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::Array(array) => Ok(array),
            _ => Err(()),
        }
    }
}

impl Index<Array> for Agent {
    type Output = ArrayHeapData;

    fn index(&self, index: Array) -> &Self::Output {
        &self.heap.arrays[index.get_index()]
    }
}

impl IndexMut<Array> for Agent {
    fn index_mut(&mut self, index: Array) -> &mut Self::Output {
        &mut self.heap.arrays[index.get_index()]
    }
}

impl InternalSlots for Array {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Array;

    #[inline(always)]
    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

impl InternalMethods for Array {
    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        if let Some(index) = self.element_index(agent, property_key) {
            if let Some(value) = agent[self].elements[index] {
                return Ok(Some(element_descriptor(value)));
            }
        } else if property_key == PropertyKey::from_str(agent, "length") {
            return Ok(Some(self.length_descriptor(agent)));
        }
        Ok(self.get_backing_object(agent).and_then(|backing_object| {
            ordinary_get_own_property(agent, backing_object, property_key)
        }))
    }

    /// ### [10.4.2.1 \[\[DefineOwnProperty\]\] ( P, Desc )](https://tc39.es/ecma262/#sec-array-exotic-objects-defineownproperty-p-desc)
    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        if let Some(index) = self.element_index(agent, property_key) {
            let current = agent[self].elements[index].map(element_descriptor);
            // Elements are always plain writable, enumerable and configurable
            // data properties; anything else does not fit the storage.
            if property_descriptor.is_accessor_descriptor()
                || property_descriptor.writable == Some(false)
                || property_descriptor.enumerable == Some(false)
                || property_descriptor.configurable == Some(false)
            {
                return Ok(false);
            }
            let value = property_descriptor
                .value
                .or(current.and_then(|current| current.value))
                .unwrap_or(Value::Undefined);
            agent[self].elements[index] = Some(value);
            return Ok(true);
        }
        if property_key.is_array_index() {
            // The length is not writable, so the array cannot grow.
            return Ok(false);
        }
        if property_key == PropertyKey::from_str(agent, "length") {
            let current = self.length_descriptor(agent);
            let extensible = self.internal_extensible(agent);
            return Ok(is_compatible_property_descriptor(
                agent,
                extensible,
                property_descriptor,
                Some(current),
            ));
        }
        let backing_object = self.get_or_create_backing_object(agent);
        Ok(ordinary_define_own_property(
            agent,
            backing_object,
            property_key,
            property_descriptor,
        ))
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        if let Some(index) = self.element_index(agent, property_key) {
            agent[self].elements[index] = None;
            return Ok(true);
        }
        if property_key == PropertyKey::from_str(agent, "length") {
            return Ok(false);
        }
        Ok(match self.get_backing_object(agent) {
            Some(backing_object) => ordinary_delete(agent, backing_object, property_key),
            None => true,
        })
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        let mut keys = agent[self]
            .elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.is_some())
            .map(|(index, _)| PropertyKey::from(index as u32))
            .collect::<Vec<_>>();
        keys.push(PropertyKey::from_str(agent, "length"));
        if let Some(backing_object) = self.get_backing_object(agent) {
            keys.extend(ordinary_own_property_keys(agent, backing_object));
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::{get, set},
        execution::Options,
    };

    #[test]
    fn elements_and_length() {
        let mut agent = Agent::new(Options::default());
        let array = Array::from_slice(&mut agent, &[Value::from(1), Value::from(2)]);
        assert_eq!(array.len(&agent), 2);
        assert!(!array.is_empty(&agent));
        assert_eq!(get(&mut agent, array, PropertyKey::from(1u32)), Ok(Value::from(2)));
        assert_eq!(get(&mut agent, array, PropertyKey::from(2u32)), Ok(Value::Undefined));
        let length = PropertyKey::from_str(&mut agent, "length");
        assert_eq!(get(&mut agent, array, length), Ok(Value::from(2)));

        set(&mut agent, array, PropertyKey::from(0u32), Value::Null, true).unwrap();
        assert_eq!(get(&mut agent, array, PropertyKey::from(0u32)), Ok(Value::Null));
        // The array cannot grow.
        assert!(set(&mut agent, array, PropertyKey::from(5u32), Value::Null, true).is_err());
        assert!(set(&mut agent, array, length, Value::from(9), true).is_err());
    }

    #[test]
    fn deleted_elements_leave_holes() {
        let mut agent = Agent::new(Options::default());
        let array = Array::from_slice(&mut agent, &[Value::from(1), Value::from(2)]);
        assert_eq!(array.internal_delete(&mut agent, PropertyKey::from(0u32)), Ok(true));
        assert_eq!(get(&mut agent, array, PropertyKey::from(0u32)), Ok(Value::Undefined));
        let length = PropertyKey::from_str(&mut agent, "length");
        assert_eq!(
            array.internal_own_property_keys(&mut agent),
            Ok(vec![PropertyKey::from(1u32), length])
        );
        assert_eq!(array.internal_delete(&mut agent, length), Ok(false));
    }
}
