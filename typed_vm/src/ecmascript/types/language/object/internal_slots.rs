use super::{Object, OrdinaryObject};
use crate::ecmascript::execution::{Agent, ProtoIntrinsics};

/// ### [10.1 Ordinary Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots)
///
/// Exotic objects keep their ordinary \[\[Extensible\]\] and \[\[Prototype\]\]
/// slots and any user-defined properties in a backing ordinary object that
/// is only created on first need.
pub trait InternalSlots
where
    Self: Sized + Copy + Into<Object>,
{
    /// Prototype intrinsic used while no backing object exists.
    const DEFAULT_PROTOTYPE: ProtoIntrinsics;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject>;

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject);

    fn create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        debug_assert!(self.get_backing_object(agent).is_none());
        let prototype = self.internal_prototype(agent);
        let backing_object = agent.heap.create_object_with_prototype(prototype);
        self.set_backing_object(agent, backing_object);
        backing_object
    }

    fn get_or_create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        match self.get_backing_object(agent) {
            Some(backing_object) => backing_object,
            None => self.create_backing_object(agent),
        }
    }

    /// #### \[\[Extensible\]\]
    fn internal_extensible(self, agent: &Agent) -> bool {
        self.get_backing_object(agent)
            .is_none_or(|backing_object| backing_object.internal_extensible(agent))
    }

    /// #### \[\[Prototype\]\]
    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        match self.get_backing_object(agent) {
            Some(backing_object) => backing_object.internal_prototype(agent),
            None => Some(
                agent
                    .current_realm()
                    .intrinsics()
                    .get_intrinsic_default_proto(Self::DEFAULT_PROTOTYPE),
            ),
        }
    }

    /// #### \[\[Prototype\]\]
    fn internal_set_prototype(self, agent: &mut Agent, prototype: Option<Object>) {
        match self.get_backing_object(agent) {
            Some(backing_object) => backing_object.internal_set_prototype(agent, prototype),
            None => {
                // The default prototype needs no backing object.
                if prototype == self.internal_prototype(agent) {
                    return;
                }
                let backing_object = agent.heap.create_object_with_prototype(prototype);
                self.set_backing_object(agent, backing_object);
            }
        }
    }
}
