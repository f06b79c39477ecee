// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ahash::RandomState;
use hashbrown::HashMap;

use super::PropertyKey;
use crate::ecmascript::{
    builtins::builtin_function::BuiltinFunction,
    types::{PropertyDescriptor, Value},
};

/// A fully populated property as stored on an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PropertyEntry {
    Data {
        value: Value,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<BuiltinFunction>,
        set: Option<BuiltinFunction>,
        enumerable: bool,
        configurable: bool,
    },
}

impl PropertyEntry {
    pub(crate) fn configurable(&self) -> bool {
        match self {
            PropertyEntry::Data { configurable, .. }
            | PropertyEntry::Accessor { configurable, .. } => *configurable,
        }
    }

    /// Builds an entry from a descriptor, filling absent fields with their
    /// default values.
    pub(crate) fn from_descriptor(descriptor: &PropertyDescriptor) -> Self {
        let enumerable = descriptor.enumerable.unwrap_or(false);
        let configurable = descriptor.configurable.unwrap_or(false);
        if descriptor.is_accessor_descriptor() {
            PropertyEntry::Accessor {
                get: descriptor.get.flatten(),
                set: descriptor.set.flatten(),
                enumerable,
                configurable,
            }
        } else {
            PropertyEntry::Data {
                value: descriptor.value.unwrap_or(Value::Undefined),
                writable: descriptor.writable.unwrap_or(false),
                enumerable,
                configurable,
            }
        }
    }

    pub(crate) fn to_descriptor(self) -> PropertyDescriptor {
        match self {
            PropertyEntry::Data {
                value,
                writable,
                enumerable,
                configurable,
            } => PropertyDescriptor {
                value: Some(value),
                writable: Some(writable),
                enumerable: Some(enumerable),
                configurable: Some(configurable),
                ..Default::default()
            },
            PropertyEntry::Accessor {
                get,
                set,
                enumerable,
                configurable,
            } => PropertyDescriptor {
                get: Some(get),
                set: Some(set),
                enumerable: Some(enumerable),
                configurable: Some(configurable),
                ..Default::default()
            },
        }
    }
}

/// Property table of an ordinary object. Keys remember their insertion
/// order.
#[derive(Debug, Clone, Default)]
pub(crate) struct PropertyStorage {
    keys: Vec<PropertyKey>,
    entries: HashMap<PropertyKey, PropertyEntry, RandomState>,
}

impl PropertyStorage {
    pub(crate) fn get(&self, key: PropertyKey) -> Option<&PropertyEntry> {
        self.entries.get(&key)
    }

    pub(crate) fn has(&self, key: PropertyKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Inserts or replaces the property at `key`. Replacing keeps the
    /// original position of the key.
    pub(crate) fn set(&mut self, key: PropertyKey, entry: PropertyEntry) {
        if self.entries.insert(key, entry).is_none() {
            self.keys.push(key);
        }
    }

    pub(crate) fn remove(&mut self, key: PropertyKey) -> Option<PropertyEntry> {
        let entry = self.entries.remove(&key)?;
        self.keys.retain(|k| *k != key);
        Some(entry)
    }

    /// ### [10.1.11.1 OrdinaryOwnPropertyKeys ( O )](https://tc39.es/ecma262/#sec-ordinaryownpropertykeys)
    ///
    /// Array indices in ascending numeric order, then every other key in
    /// ascending chronological order of property creation.
    pub(crate) fn keys(&self) -> Vec<PropertyKey> {
        let mut indices = self
            .keys
            .iter()
            .copied()
            .filter(|key| key.is_array_index())
            .collect::<Vec<_>>();
        indices.sort_unstable_by_key(|key| key.into_u32());
        indices.extend(self.keys.iter().copied().filter(|key| !key.is_array_index()));
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::{Heap, indexes::StringIndex};

    fn data(value: Value) -> PropertyEntry {
        PropertyEntry::from_descriptor(&PropertyDescriptor::new_data_descriptor(value))
    }

    #[test]
    fn own_keys_order() {
        let mut heap = Heap::new();
        let foo = heap.create_string("foo");
        let bar = heap.create_string("bar");
        let mut storage = PropertyStorage::default();
        storage.set(PropertyKey::String(foo), data(Value::Null));
        storage.set(PropertyKey::Integer(10), data(Value::Null));
        storage.set(PropertyKey::Integer(-1), data(Value::Null));
        storage.set(PropertyKey::String(bar), data(Value::Null));
        storage.set(PropertyKey::Integer(2), data(Value::Null));
        assert_eq!(
            storage.keys(),
            vec![
                PropertyKey::Integer(2),
                PropertyKey::Integer(10),
                PropertyKey::String(foo),
                PropertyKey::Integer(-1),
                PropertyKey::String(bar),
            ]
        );
    }

    #[test]
    fn replace_keeps_position_and_remove_forgets() {
        let a = PropertyKey::String(StringIndex::from_index(0).into());
        let b = PropertyKey::String(StringIndex::from_index(1).into());
        let mut storage = PropertyStorage::default();
        storage.set(a, data(Value::from(1)));
        storage.set(b, data(Value::from(2)));
        storage.set(a, data(Value::from(3)));
        assert_eq!(storage.keys(), vec![a, b]);
        assert!(matches!(
            storage.get(a),
            Some(PropertyEntry::Data { value, .. }) if *value == Value::from(3)
        ));
        assert!(storage.remove(a).is_some());
        assert!(!storage.has(a));
        assert!(storage.remove(a).is_none());
        assert_eq!(storage.keys(), vec![b]);
    }

    #[test]
    fn accessor_defaults() {
        let entry = PropertyEntry::from_descriptor(&PropertyDescriptor {
            get: Some(None),
            ..Default::default()
        });
        assert_eq!(
            entry,
            PropertyEntry::Accessor {
                get: None,
                set: None,
                enumerable: false,
                configurable: false
            }
        );
        let descriptor = entry.to_descriptor();
        assert_eq!(descriptor.set, Some(None));
        assert_eq!(descriptor.value, None);
    }
}
