//! Packed vectors for buffers.

use crate::compute::{Vec3, Vec4};
use bytemuck::{Pod, Zeroable};

/// A 3-component vector, packed: 12 bytes, 4-byte aligned.
///
/// Storage only. Convert with [`PackedVec3::to_compute`] before doing math.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A 4-component vector, packed: 16 bytes, 4-byte aligned.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedVec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl PackedVec3 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub const fn from_array([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }

    #[inline]
    pub const fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Load into the aligned representation for arithmetic.
    #[inline]
    pub fn to_compute(&self) -> Vec3 {
        Vec3::from_storage(self)
    }

    /// Store an aligned value.
    #[inline]
    pub fn from_compute(v: &Vec3) -> Self {
        v.to_storage()
    }

    /// Bit-for-bit equality (distinguishes `-0.0`, compares NaN payloads).
    #[inline]
    pub fn bits_eq(&self, other: &Self) -> bool {
        bytemuck::bytes_of(self) == bytemuck::bytes_of(other)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl PackedVec4 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    #[inline]
    pub const fn from_array([x, y, z, w]: [f32; 4]) -> Self {
        Self::new(x, y, z, w)
    }

    #[inline]
    pub const fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Load into the aligned representation for arithmetic.
    #[inline]
    pub fn to_compute(&self) -> Vec4 {
        Vec4::from_storage(self)
    }

    /// Store an aligned value.
    #[inline]
    pub fn from_compute(v: &Vec4) -> Self {
        v.to_storage()
    }

    #[inline]
    pub fn bits_eq(&self, other: &Self) -> bool {
        bytemuck::bytes_of(self) == bytemuck::bytes_of(other)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_vec_sizes() {
        assert_eq!(std::mem::size_of::<PackedVec3>(), 12);
        assert_eq!(std::mem::align_of::<PackedVec3>(), 4);
        assert_eq!(std::mem::size_of::<PackedVec4>(), 16);
        assert_eq!(std::mem::align_of::<PackedVec4>(), 4);
    }

    #[test]
    fn test_packed_vec_bytes() {
        let v = PackedVec3::new(1.0, 2.0, 3.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_bits_eq() {
        let a = PackedVec3::new(0.0, 1.0, 2.0);
        let b = PackedVec3::new(-0.0, 1.0, 2.0);
        assert_eq!(a, b);
        assert!(!a.bits_eq(&b));

        let nan = PackedVec4::splat(f32::NAN);
        assert_ne!(nan, nan);
        assert!(nan.bits_eq(&nan));
    }

    #[test]
    fn test_packed_default_is_zero() {
        assert_eq!(PackedVec3::default(), PackedVec3::ZERO);
        assert_eq!(PackedVec4::default().to_array(), [0.0; 4]);
    }

    #[test]
    fn test_axis_constants_match_compute() {
        assert_eq!(PackedVec3::X.to_compute(), Vec3::X);
        assert_eq!(PackedVec3::Z.to_compute(), Vec3::Z);
        assert_eq!(PackedVec4::X.to_compute(), Vec4::X);
        assert_eq!(PackedVec4::Y.to_compute(), Vec4::Y);
        assert_eq!(PackedVec4::Z.to_compute(), Vec4::Z);
        assert_eq!(PackedVec4::W.to_compute(), Vec4::W);
        assert_eq!(PackedVec4::from_compute(&Vec4::W), PackedVec4::W);
    }
}
