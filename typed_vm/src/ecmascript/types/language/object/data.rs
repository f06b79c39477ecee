use super::{Object, PropertyStorage};

#[derive(Debug, Clone)]
pub struct ObjectHeapData {
    pub(crate) extensible: bool,
    pub(crate) prototype: Option<Object>,
    pub(crate) properties: PropertyStorage,
}

impl ObjectHeapData {
    pub(crate) fn new(extensible: bool, prototype: Option<Object>) -> Self {
        Self {
            extensible,
            prototype,
            properties: PropertyStorage::default(),
        }
    }
}
