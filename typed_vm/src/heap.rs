// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod indexes;

use ahash::RandomState;
use hashbrown::HashTable;

use self::indexes::{ObjectIndex, StringIndex};
use crate::ecmascript::{
    builtins::{
        ArrayBufferHeapData, array::ArrayHeapData, builtin_function::BuiltinFunctionHeapData,
        error::ErrorHeapData, typed_array::data::TypedArrayHeapData,
    },
    types::{Object, ObjectHeapData, OrdinaryObject, String, StringHeapData},
};

/// Owner of all engine data. Handles are plain indexes into the vectors
/// below; nothing is ever collected, so a handle stays valid for the
/// lifetime of the heap.
#[derive(Debug)]
pub struct Heap {
    pub(crate) array_buffers: Vec<ArrayBufferHeapData>,
    pub(crate) arrays: Vec<ArrayHeapData>,
    pub(crate) builtin_functions: Vec<BuiltinFunctionHeapData>,
    pub(crate) errors: Vec<ErrorHeapData>,
    pub(crate) objects: Vec<ObjectHeapData>,
    pub(crate) strings: Vec<StringHeapData>,
    pub(crate) typed_arrays: Vec<TypedArrayHeapData>,
    string_lookup_table: HashTable<StringIndex>,
    string_hasher: RandomState,
}

pub trait CreateHeapData<T, F> {
    /// Creates a handle for the given data. The data is always allocated
    /// onto the heap.
    fn create(&mut self, data: T) -> F;
}

impl CreateHeapData<ObjectHeapData, OrdinaryObject> for Heap {
    fn create(&mut self, data: ObjectHeapData) -> OrdinaryObject {
        self.objects.push(data);
        OrdinaryObject::from(ObjectIndex::last(&self.objects))
    }
}

impl CreateHeapData<&str, String> for Heap {
    fn create(&mut self, data: &str) -> String {
        self.create_string(data)
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    pub fn new() -> Heap {
        Heap {
            array_buffers: Vec::with_capacity(64),
            arrays: Vec::with_capacity(64),
            builtin_functions: Vec::with_capacity(64),
            errors: Vec::with_capacity(16),
            objects: Vec::with_capacity(256),
            strings: Vec::with_capacity(256),
            typed_arrays: Vec::with_capacity(64),
            string_lookup_table: HashTable::with_capacity(256),
            string_hasher: RandomState::new(),
        }
    }

    /// Interns `message`: equal strings always share one handle, which lets
    /// property keys and string values compare by index.
    pub(crate) fn create_string(&mut self, message: &str) -> String {
        let hash = self.string_hasher.hash_one(message);
        let Heap {
            strings,
            string_lookup_table,
            string_hasher,
            ..
        } = self;
        if let Some(index) = string_lookup_table.find(hash, |index| {
            strings[index.into_index()].data.as_str() == Some(message)
        }) {
            return String::from(*index);
        }
        strings.push(StringHeapData::from_str(message));
        let index = StringIndex::last(strings);
        string_lookup_table.insert_unique(hash, index, |index| {
            string_hasher.hash_one(&*strings[index.into_index()].data.to_string_lossy())
        });
        String::from(index)
    }

    pub(crate) fn create_object_with_prototype(
        &mut self,
        prototype: Option<Object>,
    ) -> OrdinaryObject {
        self.create(ObjectHeapData::new(true, prototype))
    }

    /// Number of items allocated per heap vector.
    pub(crate) fn statistics(&self) -> HeapStatistics {
        HeapStatistics {
            array_buffers: self.array_buffers.len(),
            arrays: self.arrays.len(),
            builtin_functions: self.builtin_functions.len(),
            errors: self.errors.len(),
            objects: self.objects.len(),
            strings: self.strings.len(),
            typed_arrays: self.typed_arrays.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeapStatistics {
    pub(crate) array_buffers: usize,
    pub(crate) arrays: usize,
    pub(crate) builtin_functions: usize,
    pub(crate) errors: usize,
    pub(crate) objects: usize,
    pub(crate) strings: usize,
    pub(crate) typed_arrays: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_interned() {
        let mut heap = Heap::new();
        let a = heap.create_string("byteLength");
        let b = heap.create_string("byteLength");
        let c = heap.create_string("byteOffset");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(heap.strings.len(), 2);
    }

    #[test]
    fn interning_survives_table_growth() {
        let mut heap = Heap::new();
        let handles = (0..1024)
            .map(|i| heap.create_string(&format!("key{i}")))
            .collect::<Vec<_>>();
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(heap.create_string(&format!("key{i}")), *handle);
        }
        assert_eq!(heap.statistics().strings, 1024);
    }
}
