// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::trace;

use super::{ArrayBuffer, ArrayBufferHeapData};
use crate::{
    ecmascript::{
        builtins::ordinary::get_prototype_from_constructor,
        execution::{Agent, JsResult, ProtoIntrinsics},
        types::{InternalSlots, Object, create_byte_data_block},
    },
    heap::indexes::ArrayBufferIndex,
};

/// #### [25.1.3.1 AllocateArrayBuffer ( constructor, byteLength )](https://tc39.es/ecma262/#sec-allocatearraybuffer)
///
/// The abstract operation AllocateArrayBuffer takes arguments *constructor*
/// (a constructor) and *byteLength* (a non-negative integer) and returns
/// either a normal completion containing an ArrayBuffer or a throw
/// completion. It is used to create an ArrayBuffer.
pub(crate) fn allocate_array_buffer(
    agent: &mut Agent,
    constructor: Object,
    byte_length: u64,
) -> JsResult<ArrayBuffer> {
    // 1. Let slots be « [[ArrayBufferData]], [[ArrayBufferByteLength]] ».
    // 2. Let obj be ? OrdinaryCreateFromConstructor(constructor, "%ArrayBuffer.prototype%", slots).
    let prototype =
        get_prototype_from_constructor(agent, constructor, ProtoIntrinsics::ArrayBuffer)?;
    // 3. Let block be ? CreateByteDataBlock(byteLength).
    let block = create_byte_data_block(agent, byte_length)?;
    // 4. Set obj.[[ArrayBufferData]] to block.
    // 5. Set obj.[[ArrayBufferByteLength]] to byteLength.
    agent.heap.array_buffers.push(ArrayBufferHeapData::new(block));
    let obj = ArrayBuffer(ArrayBufferIndex::last(&agent.heap.array_buffers));
    if prototype.is_some() {
        obj.internal_set_prototype(agent, prototype);
    }
    trace!(?obj, byte_length, "allocated array buffer");
    // 6. Return obj.
    Ok(obj)
}

/// #### [25.1.3.5 CloneArrayBuffer ( srcBuffer, srcByteOffset, srcLength )](https://tc39.es/ecma262/#sec-clonearraybuffer)
///
/// Creates a new ArrayBuffer whose data is a copy of srcBuffer's data over
/// the range starting at srcByteOffset and continuing for srcLength bytes.
pub(crate) fn clone_array_buffer(
    agent: &mut Agent,
    src_buffer: ArrayBuffer,
    src_byte_offset: usize,
    src_length: usize,
) -> JsResult<ArrayBuffer> {
    let array_buffer_constructor = agent.current_realm().intrinsics().array_buffer();
    // 1. Let targetBuffer be ? AllocateArrayBuffer(%ArrayBuffer%, srcLength).
    let target_buffer =
        allocate_array_buffer(agent, array_buffer_constructor.into(), src_length as u64)?;
    // 2. Let srcBlock be srcBuffer.[[ArrayBufferData]].
    // 3. Let targetBlock be targetBuffer.[[ArrayBufferData]].
    // 4. Perform CopyDataBlockBytes(targetBlock, 0, srcBlock, srcByteOffset, srcLength).
    // The target was pushed last, so it sits past every existing buffer.
    let (sources, targets) = agent
        .heap
        .array_buffers
        .split_at_mut(target_buffer.get_index());
    let src_block = &sources[src_buffer.get_index()].buffer;
    targets[0]
        .buffer
        .copy_data_block_bytes(0, src_block, src_byte_offset, src_length);
    // 5. Return targetBuffer.
    Ok(target_buffer)
}
