// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [25.1 ArrayBuffer Objects](https://tc39.es/ecma262/#sec-arraybuffer-objects)

mod abstract_operations;
mod data;

use std::ops::{Index, IndexMut};

pub(crate) use abstract_operations::{allocate_array_buffer, clone_array_buffer};
pub use data::ArrayBufferHeapData;

use crate::{
    ecmascript::{
        execution::{Agent, ProtoIntrinsics},
        types::{DataBlock, InternalMethods, InternalSlots, Object, OrdinaryObject, Value},
    },
    heap::indexes::ArrayBufferIndex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayBuffer(ArrayBufferIndex);

impl ArrayBuffer {
    pub(crate) fn get_index(self) -> usize {
        self.0.into_index()
    }

    /// ### [\[\[ArrayBufferByteLength\]\]](https://tc39.es/ecma262/#sec-properties-of-the-arraybuffer-instances)
    #[inline]
    pub fn byte_length(self, agent: &Agent) -> usize {
        agent[self].buffer.len()
    }

    /// The bytes of the buffer.
    pub fn as_slice(self, agent: &Agent) -> &[u8] {
        agent[self].buffer.as_slice()
    }

    pub(crate) fn get_data_block(self, agent: &Agent) -> &DataBlock {
        &agent[self].buffer
    }

    pub(crate) fn get_data_block_mut(self, agent: &mut Agent) -> &mut DataBlock {
        &mut agent[self].buffer
    }

    pub fn into_value(self) -> Value {
        self.into()
    }

    pub fn into_object(self) -> Object {
        self.into()
    }
}

impl From<ArrayBufferIndex> for ArrayBuffer {
    fn from(value: ArrayBufferIndex) -> Self {
        ArrayBuffer(value)
    }
}

impl From<ArrayBuffer> for Object {
    fn from(value: ArrayBuffer) -> Self {
        Self::ArrayBuffer(value)
    }
}

impl From<ArrayBuffer> for Value {
    fn from(value: ArrayBuffer) -> Self {
        Self::ArrayBuffer(value)
    }
}

impl TryFrom<Value> for ArrayBuffer {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::ArrayBuffer(array_buffer) => Ok(array_buffer),
            _ => Err(()),
        }
    }
}

impl Index<ArrayBuffer> for Agent {
    type Output = ArrayBufferHeapData;

    fn index(&self, index: ArrayBuffer) -> &Self::Output {
        &self.heap.array_buffers[index.get_index()]
    }
}

impl IndexMut<ArrayBuffer> for Agent {
    fn index_mut(&mut self, index: ArrayBuffer) -> &mut Self::Output {
        &mut self.heap.array_buffers[index.get_index()]
    }
}

impl InternalSlots for ArrayBuffer {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::ArrayBuffer;

    #[inline(always)]
    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

/// ArrayBuffers are ordinary objects apart from their internal slots: every
/// property lives in the backing object, created on first definition.
impl InternalMethods for ArrayBuffer {}
