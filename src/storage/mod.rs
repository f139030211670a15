//! Storage representation: packed types for buffers.
//!
//! Every type here is `#[repr(C)]`, made only of `f32`, exactly
//! `components * 4` bytes and 4-byte aligned on every platform. Slices of
//! them are contiguous raw memory: they can be written to disk, memory-mapped
//! or uploaded to an accelerator byte for byte.
//!
//! No arithmetic is provided. Load into [`crate::compute`] first:
//!
//! ```
//! use helion_geometry::compute::Mat4;
//! use helion_geometry::storage::PackedVec3;
//!
//! let p = PackedVec3::new(1.0, 2.0, 3.0);
//! let moved = Mat4::IDENTITY.transform_point3(p.to_compute());
//! assert!(moved.to_storage().bits_eq(&p));
//! ```

mod buffer;
mod matrix;
mod vector;

pub use buffer::PackedBuffer;
pub use matrix::{PackedMat3, PackedMat4};
pub use vector::{PackedVec3, PackedVec4};

use crate::convert::ToCompute;
use crate::util::{Error, Kind, Result};
use bytemuck::Pod;
use std::fmt;
use std::mem::{align_of, size_of};

/// A packed, byte-castable element type.
pub trait Packed: Pod + ToCompute + PartialEq + fmt::Debug + Send + Sync {
    /// Entity held by this type.
    const KIND: Kind;
}

impl Packed for PackedVec3 {
    const KIND: Kind = Kind::Vec3;
}

impl Packed for PackedVec4 {
    const KIND: Kind = Kind::Vec4;
}

impl Packed for PackedMat3 {
    const KIND: Kind = Kind::Mat3;
}

impl Packed for PackedMat4 {
    const KIND: Kind = Kind::Mat4;
}

// Layout guarantees, checked at compile time.
const _: () = {
    assert!(size_of::<PackedVec3>() == Kind::Vec3.num_bytes());
    assert!(size_of::<PackedVec4>() == Kind::Vec4.num_bytes());
    assert!(size_of::<PackedMat3>() == Kind::Mat3.num_bytes());
    assert!(size_of::<PackedMat4>() == Kind::Mat4.num_bytes());
    assert!(align_of::<PackedVec3>() == 4);
    assert!(align_of::<PackedVec4>() == 4);
    assert!(align_of::<PackedMat3>() == 4);
    assert!(align_of::<PackedMat4>() == 4);
};

/// Borrow a packed slice as raw bytes (native endianness).
#[inline]
pub fn as_bytes<T: Packed>(items: &[T]) -> &[u8] {
    bytemuck::cast_slice(items)
}

/// Zero-copy view of native-endian bytes as packed elements.
///
/// Fails when the length is not a whole number of elements or the bytes
/// are not 4-byte aligned. [`PackedBuffer::from_bytes`] copies instead and
/// accepts any alignment.
pub fn cast_bytes<T: Packed>(bytes: &[u8]) -> Result<&[T]> {
    let stride = size_of::<T>();
    if bytes.len() % stride != 0 {
        return Err(Error::InvalidLength {
            len: bytes.len(),
            stride,
        });
    }
    Ok(bytemuck::try_cast_slice(bytes)?)
}
