// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::types::{DataBlock, OrdinaryObject};

#[derive(Debug, Clone)]
pub struct ArrayBufferHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    /// ### [\[\[ArrayBufferData\]\]](https://tc39.es/ecma262/#sec-properties-of-the-arraybuffer-instances)
    ///
    /// The block length is the \[\[ArrayBufferByteLength\]\].
    pub(crate) buffer: DataBlock,
}

impl ArrayBufferHeapData {
    pub(crate) fn new(buffer: DataBlock) -> Self {
        Self {
            object_index: None,
            buffer,
        }
    }
}
