// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod intrinsics;

pub use intrinsics::{Intrinsics, ProtoIntrinsics};

use crate::heap::Heap;

/// ### [9.3 Realms](https://tc39.es/ecma262/#sec-code-realms)
///
/// Before it is evaluated, all ECMAScript code must be associated with a
/// realm. Conceptually, a realm consists of a set of intrinsic objects, an
/// ECMAScript global environment, all of the ECMAScript code that is loaded
/// within the scope of that global environment, and other associated state
/// and resources.
///
/// Only the intrinsics are modelled here.
#[derive(Debug)]
pub struct Realm {
    /// ### \[\[Intrinsics]]
    intrinsics: Intrinsics,
}

impl Realm {
    /// Allocates the realm's intrinsic objects. Their properties are filled
    /// in by [`Intrinsics::initialize`] once the agent exists.
    pub(crate) fn new(heap: &mut Heap) -> Self {
        Self {
            intrinsics: Intrinsics::new(heap),
        }
    }

    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }
}

#[cfg(test)]
mod test {
    use crate::ecmascript::{
        builtins::TypedArrayKind,
        execution::{Agent, Options, ProtoIntrinsics},
        types::{InternalSlots, Object},
    };

    #[test]
    fn test_default_realm_sanity() {
        let agent = Agent::new(Options::default());
        let intrinsics = agent.current_realm().intrinsics();
        assert_eq!(intrinsics.object_prototype().get_index(), 0);
        assert!(intrinsics.object_prototype().internal_prototype(&agent).is_none());
        assert!(agent.heap.array_buffers.is_empty());
        assert!(agent.heap.arrays.is_empty());
        assert!(agent.heap.errors.is_empty());
        assert!(agent.heap.typed_arrays.is_empty());
        // Every builtin function carries its length and name.
        for function in agent.heap.builtin_functions.iter() {
            assert!(function.object_index.is_some());
        }

        let typed_array_prototype: Object = intrinsics.typed_array_prototype().into();
        for kind in TypedArrayKind::ALL {
            let prototype = intrinsics.get_intrinsic_default_proto(ProtoIntrinsics::from(kind));
            assert_eq!(
                prototype.internal_prototype(&agent),
                Some(typed_array_prototype)
            );
            assert_eq!(
                intrinsics.typed_array_constructor(kind).internal_prototype(&agent),
                Some(intrinsics.typed_array().into())
            );
        }
        assert_eq!(
            intrinsics
                .get_intrinsic_default_proto(ProtoIntrinsics::RangeError)
                .internal_prototype(&agent),
            Some(intrinsics.error_prototype().into())
        );
    }
}
