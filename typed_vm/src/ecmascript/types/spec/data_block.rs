// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [6.2.9 Data Blocks](https://tc39.es/ecma262/#sec-data-blocks)

use core::mem::size_of;

use num_traits::AsPrimitive;

use crate::ecmascript::{
    builtins::typed_array::TypedArrayKind,
    execution::{Agent, JsResult, agent::ExceptionType},
};

/// # Data Block
///
/// The Data Block specification type is used to describe a distinct and
/// mutable sequence of byte-sized (8 bit) numeric values. A byte value
/// is an integer in the inclusive interval from 0 to 255. A Data Block
/// value is created with a fixed number of bytes that each have the
/// initial value 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    bytes: Box<[u8]>,
}

mod private {
    use super::U8Clamped;

    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for U8Clamped {}
    impl Sealed for i8 {}
    impl Sealed for u16 {}
    impl Sealed for i16 {}
    impl Sealed for u32 {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// An element type that a typed view can read from and write into a
/// [`DataBlock`]. Values are stored in native byte order.
pub trait Viewable: private::Sealed + Copy + PartialEq + core::fmt::Debug + 'static {
    /// Element kind of the typed view that stores this type.
    const KIND: TypedArrayKind;

    fn from_ne_slice(bytes: &[u8]) -> Self;

    fn write_ne_slice(self, bytes: &mut [u8]);

    /// ### [7.1.6 ToInt8 (and friends)](https://tc39.es/ecma262/#sec-toint8)
    ///
    /// Converts an already coerced Number into the element type.
    fn from_f64(value: f64) -> Self;

    fn into_f64(self) -> f64;
}

/// Unsigned 8-bit element that saturates instead of wrapping on writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct U8Clamped(pub u8);

/// Integer part of `value` modulo 2^32; NaN and the infinities map to 0.
fn modulo_two_to_the_32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4294967296.0) as u32
}

macro_rules! integer_viewable {
    ($ty:ty, $kind:ident) => {
        impl Viewable for $ty {
            const KIND: TypedArrayKind = TypedArrayKind::$kind;

            fn from_ne_slice(bytes: &[u8]) -> Self {
                let mut buf = [0u8; size_of::<$ty>()];
                buf.copy_from_slice(bytes);
                <$ty>::from_ne_bytes(buf)
            }

            fn write_ne_slice(self, bytes: &mut [u8]) {
                bytes.copy_from_slice(&self.to_ne_bytes());
            }

            fn from_f64(value: f64) -> Self {
                // The low W bits of the 32-bit modulo are the W-bit modulo;
                // the signed casts then reinterpret the top bit as the sign.
                modulo_two_to_the_32(value).as_()
            }

            fn into_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

integer_viewable!(i8, Int8);
integer_viewable!(u8, Uint8);
integer_viewable!(i16, Int16);
integer_viewable!(u16, Uint16);
integer_viewable!(i32, Int32);
integer_viewable!(u32, Uint32);

impl Viewable for U8Clamped {
    const KIND: TypedArrayKind = TypedArrayKind::Uint8Clamped;

    fn from_ne_slice(bytes: &[u8]) -> Self {
        Self(bytes[0])
    }

    fn write_ne_slice(self, bytes: &mut [u8]) {
        bytes[0] = self.0;
    }

    /// ### [7.1.12 ToUint8Clamp ( argument )](https://tc39.es/ecma262/#sec-touint8clamp)
    fn from_f64(value: f64) -> Self {
        // 2. If number is NaN, return +0𝔽.
        if value.is_nan() {
            return Self(0);
        }
        // 3-8. Clamp to [0, 255], rounding ties to even.
        Self(value.clamp(0.0, 255.0).round_ties_even() as u8)
    }

    fn into_f64(self) -> f64 {
        self.0 as f64
    }
}

impl Viewable for f32 {
    const KIND: TypedArrayKind = TypedArrayKind::Float32;

    fn from_ne_slice(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        f32::from_ne_bytes(buf)
    }

    fn write_ne_slice(self, bytes: &mut [u8]) {
        bytes.copy_from_slice(&self.to_ne_bytes());
    }

    fn from_f64(value: f64) -> Self {
        // roundTiesToEven
        value as f32
    }

    fn into_f64(self) -> f64 {
        self as f64
    }
}

impl Viewable for f64 {
    const KIND: TypedArrayKind = TypedArrayKind::Float64;

    fn from_ne_slice(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        f64::from_ne_bytes(buf)
    }

    fn write_ne_slice(self, bytes: &mut [u8]) {
        bytes.copy_from_slice(&self.to_ne_bytes());
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn into_f64(self) -> f64 {
        self
    }
}

impl DataBlock {
    /// A zeroed block of `len` bytes. Size limits are enforced by
    /// [`create_byte_data_block`].
    pub(crate) fn new(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Reads a `T` starting at `byte_index`. Returns `None` if the element
    /// does not fit entirely within the block.
    pub fn get<T: Viewable>(&self, byte_index: usize) -> Option<T> {
        let end = byte_index.checked_add(size_of::<T>())?;
        self.bytes.get(byte_index..end).map(T::from_ne_slice)
    }

    /// Writes `value` starting at `byte_index`. Writes that do not fit
    /// entirely within the block are ignored.
    pub fn set<T: Viewable>(&mut self, byte_index: usize, value: T) {
        let Some(end) = byte_index.checked_add(size_of::<T>()) else {
            return;
        };
        if let Some(bytes) = self.bytes.get_mut(byte_index..end) {
            value.write_ne_slice(bytes);
        }
    }

    /// ### [6.2.9.3 CopyDataBlockBytes ( toBlock, toIndex, fromBlock, fromIndex, count )](https://tc39.es/ecma262/#sec-copydatablockbytes)
    pub fn copy_data_block_bytes(
        &mut self,
        to_index: usize,
        from_block: &Self,
        from_index: usize,
        count: usize,
    ) {
        let to_block = self;
        // 2. Let fromSize be the number of bytes in fromBlock.
        let from_size = from_block.len();
        // 3. Assert: fromIndex + count ≤ fromSize.
        assert!(from_index + count <= from_size);
        // 4. Let toSize be the number of bytes in toBlock.
        let to_size = to_block.len();
        // 5. Assert: toIndex + count ≤ toSize.
        assert!(to_index + count <= to_size);
        // 6. Repeat, while count > 0,
        to_block.bytes[to_index..to_index + count]
            .copy_from_slice(&from_block.bytes[from_index..from_index + count]);
    }
}

/// ### [6.2.9.1 CreateByteDataBlock ( size )](https://tc39.es/ecma262/#sec-createbytedatablock)
///
/// The abstract operation CreateByteDataBlock takes argument size (a
/// non-negative integer) and returns either a normal completion containing
/// a Data Block or a throw completion.
pub(crate) fn create_byte_data_block(agent: &mut Agent, size: u64) -> JsResult<DataBlock> {
    // 1. If size > 2**53 - 1, throw a RangeError exception.
    if size > u64::pow(2, 53) - 1 {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "Array buffer length exceeds the maximum safe integer",
        ));
    }
    // 2. Let db be a new Data Block value consisting of size bytes. If it
    //    is impossible to create such a Data Block, throw a RangeError
    //    exception.
    if size > agent.options.max_array_buffer_byte_length {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "Array buffer allocation failed",
        ));
    }
    let Ok(size) = usize::try_from(size) else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "Array buffer allocation failed",
        ));
    };
    // 3. Set all of the bytes of db to 0.
    // 4. Return db.
    Ok(DataBlock::new(size))
}

#[test]
fn new_data_block() {
    let db = DataBlock::new(0);
    assert_eq!(db.len(), 0);
    assert!(db.is_empty());
    assert_eq!(db.get::<u8>(0), None);

    let db = DataBlock::new(8);
    assert_eq!(db.len(), 8);
    for i in 0..8 {
        assert_eq!(db.get::<u8>(i), Some(0));
    }
    assert_eq!(db.get::<u8>(8), None);
}

#[test]
fn data_block_set() {
    let mut db = DataBlock::new(8);
    for i in 0..8 {
        db.set::<u8>(i, i as u8 + 1);
    }
    assert_eq!(db.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);

    db.set::<u16>(0, 0x0A0B);
    assert_eq!(db.get::<u16>(0), Some(0x0A0B));
    assert_eq!(db.get::<u8>(2), Some(3));

    // Does not fit: ignored.
    db.set::<u32>(6, u32::MAX);
    assert_eq!(db.get::<u8>(6), Some(7));
    assert_eq!(db.get::<u32>(6), None);
    assert!(db.get::<f64>(0).is_some());
    assert_eq!(db.get::<f64>(1), None);
}

#[test]
fn data_block_copy_data_block_bytes() {
    let mut db = DataBlock::new(8);
    let mut db2 = DataBlock::new(8);
    for i in 0..8 {
        db2.set::<u8>(i, i as u8 + 1);
    }
    db.copy_data_block_bytes(2, &db2, 4, 3);
    assert_eq!(db.as_slice(), &[0, 0, 5, 6, 7, 0, 0, 0]);
    db2.set::<u8>(4, 0xFF);
    assert_eq!(db.get::<u8>(2), Some(5));
}

#[test]
fn integer_modulo_encoding() {
    assert_eq!(u8::from_f64(0x1FA as f64), 0xFA);
    assert_eq!(u8::from_f64(-1.0), 0xFF);
    assert_eq!(i8::from_f64(0x1FA as f64), -6);
    assert_eq!(i8::from_f64(0x7A as f64 - 0x80 as f64), -6);
    assert_eq!(u16::from_f64(0x1FFFA as f64), 0xFFFA);
    assert_eq!(u16::from_f64(-1.0), 0xFFFF);
    assert_eq!(i16::from_f64(0x1FFFA as f64), -6);
    assert_eq!(u32::from_f64(0x1FFFFFFFA_u64 as f64), 0xFFFFFFFA);
    assert_eq!(u32::from_f64(-1.0), u32::MAX);
    assert_eq!(i32::from_f64(0x1FFFFFFFA_u64 as f64), -6);
    assert_eq!(u8::from_f64(3.99), 3);
    assert_eq!(i8::from_f64(-3.99), -3);
    assert_eq!(u8::from_f64(f64::NAN), 0);
    assert_eq!(u32::from_f64(f64::INFINITY), 0);
    assert_eq!(i32::from_f64(f64::NEG_INFINITY), 0);
    assert_eq!(u32::from_f64(1e20), (1e20 % 4294967296.0) as u32);
}

#[test]
fn clamped_encoding() {
    assert_eq!(U8Clamped::from_f64(0x1FA as f64), U8Clamped(0xFF));
    assert_eq!(U8Clamped::from_f64(-1.0), U8Clamped(0));
    assert_eq!(U8Clamped::from_f64(f64::NAN), U8Clamped(0));
    assert_eq!(U8Clamped::from_f64(f64::INFINITY), U8Clamped(255));
    assert_eq!(U8Clamped::from_f64(f64::NEG_INFINITY), U8Clamped(0));
    assert_eq!(U8Clamped::from_f64(0.5), U8Clamped(0));
    assert_eq!(U8Clamped::from_f64(1.5), U8Clamped(2));
    assert_eq!(U8Clamped::from_f64(2.5), U8Clamped(2));
    assert_eq!(U8Clamped::from_f64(2.6), U8Clamped(3));
    assert_eq!(U8Clamped::from_f64(254.5), U8Clamped(254));
}

#[test]
fn float_encoding() {
    assert_eq!(f32::from_f64(0.1).into_f64(), 0.1f32 as f64);
    assert_ne!(f32::from_f64(0.1).into_f64(), 0.1);
    assert_eq!(f64::from_f64(0.1).into_f64(), 0.1);
    assert!(f32::from_f64(f64::NAN).is_nan());
    assert_eq!(f32::from_f64(1e300), f32::INFINITY);
}
