// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    builtins::BuiltinFunction,
    execution::Agent,
    types::{PropertyEntry, PropertyKey, Value},
};

#[doc(hidden)]
#[derive(Default, Clone, Copy)]
pub struct NoKey;

#[doc(hidden)]
#[derive(Default, Clone, Copy)]
pub struct NoDefinition;

#[doc(hidden)]
#[derive(Clone, Copy)]
pub struct CreatorKey(PropertyKey);

#[doc(hidden)]
#[derive(Clone, Copy)]
pub struct CreatorGetAccessor(BuiltinFunction);

#[doc(hidden)]
#[derive(Clone, Copy)]
pub struct CreatorValue(Value);

#[doc(hidden)]
#[derive(Clone, Copy)]
pub struct CreatorReadOnlyValue(Value);

/// Builder for one property of an intrinsic object.
pub struct PropertyBuilder<'agent, K: 'static, D> {
    pub(crate) agent: &'agent mut Agent,
    key: K,
    definition: D,
    enumerable: bool,
    configurable: bool,
}

impl<'agent> PropertyBuilder<'agent, NoKey, NoDefinition> {
    pub(crate) fn new(agent: &'agent mut Agent) -> Self {
        PropertyBuilder {
            agent,
            key: NoKey,
            definition: NoDefinition,
            enumerable: true,
            configurable: true,
        }
    }
}

impl<'agent, D> PropertyBuilder<'agent, NoKey, D> {
    pub fn with_key(self, key: PropertyKey) -> PropertyBuilder<'agent, CreatorKey, D> {
        PropertyBuilder {
            agent: self.agent,
            key: CreatorKey(key),
            definition: self.definition,
            enumerable: self.enumerable,
            configurable: self.configurable,
        }
    }

    /// Interns `name` and uses it as the key.
    pub fn with_key_from_str(self, name: &str) -> PropertyBuilder<'agent, CreatorKey, D> {
        let key = PropertyKey::from_str(self.agent, name);
        self.with_key(key)
    }
}

impl<'agent, K> PropertyBuilder<'agent, K, NoDefinition> {
    pub fn with_value(self, value: Value) -> PropertyBuilder<'agent, K, CreatorValue> {
        PropertyBuilder {
            agent: self.agent,
            key: self.key,
            definition: CreatorValue(value),
            enumerable: self.enumerable,
            configurable: self.configurable,
        }
    }

    pub fn with_value_readonly(
        self,
        value: Value,
    ) -> PropertyBuilder<'agent, K, CreatorReadOnlyValue> {
        PropertyBuilder {
            agent: self.agent,
            key: self.key,
            definition: CreatorReadOnlyValue(value),
            enumerable: self.enumerable,
            configurable: self.configurable,
        }
    }

    pub fn with_getter_function(
        self,
        getter: BuiltinFunction,
    ) -> PropertyBuilder<'agent, K, CreatorGetAccessor> {
        PropertyBuilder {
            agent: self.agent,
            key: self.key,
            definition: CreatorGetAccessor(getter),
            enumerable: self.enumerable,
            configurable: self.configurable,
        }
    }
}

impl<K, D> PropertyBuilder<'_, K, D> {
    pub fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    pub fn with_configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }
}

impl PropertyBuilder<'_, CreatorKey, CreatorValue> {
    pub fn build(self) -> (PropertyKey, PropertyEntry) {
        (
            self.key.0,
            PropertyEntry::Data {
                value: self.definition.0,
                writable: true,
                enumerable: self.enumerable,
                configurable: self.configurable,
            },
        )
    }
}

impl PropertyBuilder<'_, CreatorKey, CreatorReadOnlyValue> {
    pub fn build(self) -> (PropertyKey, PropertyEntry) {
        (
            self.key.0,
            PropertyEntry::Data {
                value: self.definition.0,
                writable: false,
                enumerable: self.enumerable,
                configurable: self.configurable,
            },
        )
    }
}

impl PropertyBuilder<'_, CreatorKey, CreatorGetAccessor> {
    pub fn build(self) -> (PropertyKey, PropertyEntry) {
        (
            self.key.0,
            PropertyEntry::Accessor {
                get: Some(self.definition.0),
                set: None,
                enumerable: self.enumerable,
                configurable: self.configurable,
            },
        )
    }
}
