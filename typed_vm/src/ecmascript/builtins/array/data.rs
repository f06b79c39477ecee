// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::types::{OrdinaryObject, Value};

#[derive(Debug, Clone, Default)]
pub struct ArrayHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    /// Element storage; `None` marks a hole left by a deleted element.
    pub(crate) elements: Vec<Option<Value>>,
}

impl ArrayHeapData {
    pub(crate) fn from_slice(elements: &[Value]) -> Self {
        Self {
            object_index: None,
            elements: elements.iter().copied().map(Some).collect(),
        }
    }
}
