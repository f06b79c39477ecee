// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::property_builder::{self, PropertyBuilder};
use crate::ecmascript::{
    builtins::{
        Builtin, BuiltinFunction, BuiltinFunctionArgs, BuiltinGetter, create_builtin_function,
    },
    execution::Agent,
    types::{InternalSlots, Object, OrdinaryObject, PropertyEntry, PropertyKey},
};

/// Fills in the properties of an already allocated intrinsic object.
pub struct OrdinaryObjectBuilder<'agent> {
    pub(crate) agent: &'agent mut Agent,
    this: OrdinaryObject,
    properties: Vec<(PropertyKey, PropertyEntry)>,
}

impl<'agent> OrdinaryObjectBuilder<'agent> {
    #[must_use]
    pub(crate) fn new_intrinsic_object(agent: &'agent mut Agent, this: OrdinaryObject) -> Self {
        Self {
            agent,
            this,
            properties: Vec::new(),
        }
    }

    /// Builds onto the backing object of an intrinsic function, next to its
    /// `length` and `name`.
    #[must_use]
    pub(crate) fn new_intrinsic_function(agent: &'agent mut Agent, this: BuiltinFunction) -> Self {
        let this = this.get_or_create_backing_object(agent);
        Self::new_intrinsic_object(agent, this)
    }

    #[must_use]
    pub fn with_property_capacity(mut self, cap: usize) -> Self {
        self.properties.reserve_exact(cap);
        self
    }

    #[must_use]
    pub fn with_property(
        mut self,
        creator: impl FnOnce(
            PropertyBuilder<'_, property_builder::NoKey, property_builder::NoDefinition>,
        ) -> (PropertyKey, PropertyEntry),
    ) -> Self {
        let builder = PropertyBuilder::new(self.agent);
        let property = creator(builder);
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_constructor_property(self, constructor: BuiltinFunction) -> Self {
        self.with_property(|builder| {
            builder
                .with_key_from_str("constructor")
                .with_value(constructor.into_value())
                .with_enumerable(false)
                .build()
        })
    }

    #[must_use]
    pub fn with_prototype_property(self, prototype: Object) -> Self {
        self.with_property(|builder| {
            builder
                .with_key_from_str("prototype")
                .with_value_readonly(prototype.into_value())
                .with_enumerable(false)
                .with_configurable(false)
                .build()
        })
    }

    #[must_use]
    pub fn with_builtin_function_property<T: Builtin>(self) -> Self {
        let function = create_builtin_function(
            self.agent,
            T::BEHAVIOUR,
            BuiltinFunctionArgs::new(T::LENGTH.into(), T::NAME),
        );
        self.with_property(|builder| {
            let builder = builder
                .with_key_from_str(T::KEY.unwrap_or(T::NAME))
                .with_configurable(T::CONFIGURABLE)
                .with_enumerable(T::ENUMERABLE);
            if T::WRITABLE {
                builder.with_value(function.into_value()).build()
            } else {
                builder.with_value_readonly(function.into_value()).build()
            }
        })
    }

    /// Installs `T` as the getter of an accessor property without a setter.
    #[must_use]
    pub fn with_builtin_function_getter_property<T: BuiltinGetter>(self) -> Self {
        let getter = create_builtin_function(
            self.agent,
            T::BEHAVIOUR,
            BuiltinFunctionArgs::new(T::LENGTH.into(), T::NAME),
        );
        self.with_property(|builder| {
            builder
                .with_key_from_str(T::KEY.unwrap_or(T::NAME))
                .with_getter_function(getter)
                .with_configurable(T::CONFIGURABLE)
                .with_enumerable(T::ENUMERABLE)
                .build()
        })
    }

    pub fn build(self) -> OrdinaryObject {
        {
            let slice = self.properties.as_slice();
            let duplicate = (1..slice.len()).find(|first_index| {
                slice[*first_index..]
                    .iter()
                    .any(|(key, _)| *key == slice[first_index - 1].0)
            });
            if let Some(index) = duplicate {
                panic!("Duplicate key found: {:?}", slice[index - 1].0);
            }
        }
        let storage = &mut self.agent[self.this].properties;
        for (key, entry) in self.properties {
            debug_assert!(!storage.has(key));
            storage.set(key, entry);
        }
        self.this
    }
}
