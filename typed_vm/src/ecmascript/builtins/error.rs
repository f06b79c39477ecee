// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::{Index, IndexMut};

use crate::{
    ecmascript::{
        execution::{Agent, ProtoIntrinsics, agent::ExceptionType},
        types::{
            InternalMethods, InternalSlots, Object, OrdinaryObject, PropertyEntry, PropertyKey,
            String, Value,
        },
    },
    heap::indexes::ErrorIndex,
};

#[derive(Debug, Clone)]
pub struct ErrorHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    pub(crate) kind: ExceptionType,
    pub(crate) message: String,
}

/// ### [20.5 Error Objects](https://tc39.es/ecma262/#sec-error-objects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error(ErrorIndex);

impl Error {
    pub(crate) fn get_index(self) -> usize {
        self.0.into_index()
    }

    /// Creates an Error object of `kind` with an own, non-enumerable
    /// `message` property.
    pub(crate) fn create(agent: &mut Agent, kind: ExceptionType, message: String) -> Self {
        let prototype = agent
            .current_realm()
            .intrinsics()
            .get_intrinsic_default_proto(kind.into());
        let backing_object = agent.heap.create_object_with_prototype(Some(prototype));
        let message_key = PropertyKey::from_str(agent, "message");
        agent[backing_object].properties.set(
            message_key,
            PropertyEntry::Data {
                value: message.into_value(),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
        agent.heap.errors.push(ErrorHeapData {
            object_index: Some(backing_object),
            kind,
            message,
        });
        Error(ErrorIndex::last(&agent.heap.errors))
    }

    pub fn kind(self, agent: &Agent) -> ExceptionType {
        agent[self].kind
    }

    pub fn into_value(self) -> Value {
        self.into()
    }
}

impl From<ExceptionType> for ProtoIntrinsics {
    fn from(kind: ExceptionType) -> Self {
        match kind {
            ExceptionType::Error => ProtoIntrinsics::Error,
            ExceptionType::RangeError => ProtoIntrinsics::RangeError,
            ExceptionType::TypeError => ProtoIntrinsics::TypeError,
        }
    }
}

impl From<Error> for Value {
    fn from(value: Error) -> Self {
        Value::Error(value)
    }
}

impl From<Error> for Object {
    fn from(value: Error) -> Self {
        Object::Error(value)
    }
}

impl Index<Error> for Agent {
    type Output = ErrorHeapData;

    fn index(&self, index: Error) -> &Self::Output {
        &self.heap.errors[index.get_index()]
    }
}

impl IndexMut<Error> for Agent {
    fn index_mut(&mut self, index: Error) -> &mut Self::Output {
        &mut self.heap.errors[index.get_index()]
    }
}

impl InternalSlots for Error {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Error;

    #[inline(always)]
    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

impl InternalMethods for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::{operations_on_objects::get, type_conversion::to_string},
        execution::Options,
    };

    #[test]
    fn errors_inherit_name_from_their_prototype() {
        let mut agent = Agent::new(Options::default());
        let message = String::from_str(&mut agent, "bad offset");
        let error = Error::create(&mut agent, ExceptionType::RangeError, message);
        assert_eq!(error.kind(&agent), ExceptionType::RangeError);
        let name_key = PropertyKey::from_str(&mut agent, "name");
        let name = get(&mut agent, error, name_key).unwrap();
        assert_eq!(name, Value::from_str(&mut agent, "RangeError"));
        let text = to_string(&mut agent, error.into_value()).unwrap();
        assert_eq!(text.as_str(&agent), Some("RangeError: bad offset"));
    }
}
