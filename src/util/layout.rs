//! Memory layout reports for compute and storage types.
//!
//! Storage types promise `components * 4` bytes with 4-byte alignment and no
//! gaps between array elements. Compute types make no such promise. The
//! reports here make both visible, e.g. for `helion-geom layout`.

use super::{Kind, COMPONENT_BYTES};
use crate::compute::{Mat3, Mat4, Vec3, Vec4};
use crate::storage::{PackedMat3, PackedMat4, PackedVec3, PackedVec4};
use bytemuck::Zeroable;
use std::fmt;
use std::mem::{align_of, size_of};

/// Which of the two layout regimes a type belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Aligned for SIMD arithmetic, may be padded.
    Compute,
    /// Packed, padding-free, byte-exact across memory domains.
    Storage,
}

impl Representation {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Storage => "storage",
        }
    }
}

/// Measured layout of one concrete type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub type_name: &'static str,
    pub kind: Kind,
    pub representation: Representation,
    /// `size_of::<T>()`
    pub size: usize,
    /// `align_of::<T>()`
    pub align: usize,
    /// Distance in bytes between consecutive elements of `[T; 2]`.
    pub stride: usize,
}

impl Layout {
    /// Measure `T`.
    pub fn of<T: Zeroable + Copy>(
        type_name: &'static str,
        kind: Kind,
        representation: Representation,
    ) -> Self {
        Self {
            type_name,
            kind,
            representation,
            size: size_of::<T>(),
            align: align_of::<T>(),
            stride: measured_stride::<T>(),
        }
    }

    /// Bytes the components alone occupy.
    #[inline]
    pub fn payload(&self) -> usize {
        self.kind.components() * COMPONENT_BYTES
    }

    /// Padding bytes per element in an array.
    #[inline]
    pub fn padding(&self) -> usize {
        self.stride - self.payload()
    }

    /// True when an array of this type is byte-for-byte its components.
    #[inline]
    pub fn is_packed(&self) -> bool {
        self.stride == self.payload() && self.align == COMPONENT_BYTES
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:<5} {:<8} size={:<3} align={:<3} stride={:<3} pad={}",
            self.type_name,
            self.kind.name(),
            self.representation.name(),
            self.size,
            self.align,
            self.stride,
            self.padding()
        )
    }
}

/// Address distance between two adjacent array elements.
pub fn measured_stride<T: Zeroable + Copy>() -> usize {
    let pair = [T::zeroed(); 2];
    let first = &pair[0] as *const T as usize;
    let second = &pair[1] as *const T as usize;
    second - first
}

/// Layouts of every compute and storage type, compute first.
pub fn report() -> Vec<Layout> {
    use Representation::{Compute, Storage};
    vec![
        Layout::of::<Vec3>("Vec3", Kind::Vec3, Compute),
        Layout::of::<Vec4>("Vec4", Kind::Vec4, Compute),
        Layout::of::<Mat3>("Mat3", Kind::Mat3, Compute),
        Layout::of::<Mat4>("Mat4", Kind::Mat4, Compute),
        Layout::of::<PackedVec3>("PackedVec3", Kind::Vec3, Storage),
        Layout::of::<PackedVec4>("PackedVec4", Kind::Vec4, Storage),
        Layout::of::<PackedMat3>("PackedMat3", Kind::Mat3, Storage),
        Layout::of::<PackedMat4>("PackedMat4", Kind::Mat4, Storage),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_layouts_are_packed() {
        for layout in report().iter().filter(|l| l.representation == Representation::Storage) {
            assert!(layout.is_packed(), "{layout}");
            assert_eq!(layout.size, layout.kind.num_bytes());
            assert_eq!(layout.padding(), 0);
        }
    }

    #[test]
    fn test_vec3_compute_is_padded() {
        let layout = Layout::of::<Vec3>("Vec3", Kind::Vec3, Representation::Compute);
        assert_eq!(layout.size, 16);
        assert_eq!(layout.align, 16);
        assert_eq!(layout.padding(), 4);
        assert!(!layout.is_packed());
    }

    #[test]
    fn test_measured_stride_matches_size() {
        assert_eq!(measured_stride::<PackedVec3>(), 12);
        assert_eq!(measured_stride::<Mat3>(), size_of::<Mat3>());
    }
}
