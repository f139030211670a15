//! Packed matrices for buffers. Column-major, no padding between columns.

use super::{PackedVec3, PackedVec4};
use crate::compute::{Mat3, Mat4};
use bytemuck::{Pod, Zeroable};

/// A 3x3 matrix, packed: 36 bytes, 4-byte aligned.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedMat3 {
    pub x_axis: PackedVec3,
    pub y_axis: PackedVec3,
    pub z_axis: PackedVec3,
}

/// A 4x4 matrix, packed: 64 bytes, 4-byte aligned.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedMat4 {
    pub x_axis: PackedVec4,
    pub y_axis: PackedVec4,
    pub z_axis: PackedVec4,
    pub w_axis: PackedVec4,
}

impl PackedMat3 {
    pub const ZERO: Self = Self::from_cols(PackedVec3::ZERO, PackedVec3::ZERO, PackedVec3::ZERO);
    pub const IDENTITY: Self = Self::from_cols(PackedVec3::X, PackedVec3::Y, PackedVec3::Z);

    #[inline]
    pub const fn from_cols(x_axis: PackedVec3, y_axis: PackedVec3, z_axis: PackedVec3) -> Self {
        Self { x_axis, y_axis, z_axis }
    }

    #[inline]
    pub const fn from_cols_array(m: &[f32; 9]) -> Self {
        Self::from_cols(
            PackedVec3::new(m[0], m[1], m[2]),
            PackedVec3::new(m[3], m[4], m[5]),
            PackedVec3::new(m[6], m[7], m[8]),
        )
    }

    /// Build from nine values listed row after row.
    #[inline]
    pub const fn from_rows_array(m: &[f32; 9]) -> Self {
        Self::from_cols(
            PackedVec3::new(m[0], m[3], m[6]),
            PackedVec3::new(m[1], m[4], m[7]),
            PackedVec3::new(m[2], m[5], m[8]),
        )
    }

    #[inline]
    pub const fn to_cols_array(&self) -> [f32; 9] {
        let (x, y, z) = (&self.x_axis, &self.y_axis, &self.z_axis);
        [x.x, x.y, x.z, y.x, y.y, y.z, z.x, z.y, z.z]
    }

    #[inline]
    pub const fn to_rows_array(&self) -> [f32; 9] {
        let (x, y, z) = (&self.x_axis, &self.y_axis, &self.z_axis);
        [x.x, y.x, z.x, x.y, y.y, z.y, x.z, y.z, z.z]
    }

    /// Load into the aligned representation for arithmetic.
    #[inline]
    pub fn to_compute(&self) -> Mat3 {
        Mat3::from_storage(self)
    }

    /// Store an aligned value.
    #[inline]
    pub fn from_compute(m: &Mat3) -> Self {
        m.to_storage()
    }

    #[inline]
    pub fn bits_eq(&self, other: &Self) -> bool {
        bytemuck::bytes_of(self) == bytemuck::bytes_of(other)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x_axis.is_finite() && self.y_axis.is_finite() && self.z_axis.is_finite()
    }
}

impl PackedMat4 {
    pub const ZERO: Self = Self::from_cols(
        PackedVec4::ZERO,
        PackedVec4::ZERO,
        PackedVec4::ZERO,
        PackedVec4::ZERO,
    );
    pub const IDENTITY: Self = Self::from_cols(
        PackedVec4::new(1.0, 0.0, 0.0, 0.0),
        PackedVec4::new(0.0, 1.0, 0.0, 0.0),
        PackedVec4::new(0.0, 0.0, 1.0, 0.0),
        PackedVec4::new(0.0, 0.0, 0.0, 1.0),
    );

    #[inline]
    pub const fn from_cols(
        x_axis: PackedVec4,
        y_axis: PackedVec4,
        z_axis: PackedVec4,
        w_axis: PackedVec4,
    ) -> Self {
        Self { x_axis, y_axis, z_axis, w_axis }
    }

    #[inline]
    pub const fn from_cols_array(m: &[f32; 16]) -> Self {
        Self::from_cols(
            PackedVec4::new(m[0], m[1], m[2], m[3]),
            PackedVec4::new(m[4], m[5], m[6], m[7]),
            PackedVec4::new(m[8], m[9], m[10], m[11]),
            PackedVec4::new(m[12], m[13], m[14], m[15]),
        )
    }

    /// Build from sixteen values listed row after row.
    #[inline]
    pub const fn from_rows_array(m: &[f32; 16]) -> Self {
        Self::from_cols(
            PackedVec4::new(m[0], m[4], m[8], m[12]),
            PackedVec4::new(m[1], m[5], m[9], m[13]),
            PackedVec4::new(m[2], m[6], m[10], m[14]),
            PackedVec4::new(m[3], m[7], m[11], m[15]),
        )
    }

    #[inline]
    pub const fn to_cols_array(&self) -> [f32; 16] {
        let (x, y, z, w) = (&self.x_axis, &self.y_axis, &self.z_axis, &self.w_axis);
        [
            x.x, x.y, x.z, x.w, y.x, y.y, y.z, y.w, z.x, z.y, z.z, z.w, w.x, w.y, w.z, w.w,
        ]
    }

    #[inline]
    pub const fn to_rows_array(&self) -> [f32; 16] {
        let (x, y, z, w) = (&self.x_axis, &self.y_axis, &self.z_axis, &self.w_axis);
        [
            x.x, y.x, z.x, w.x, x.y, y.y, z.y, w.y, x.z, y.z, z.z, w.z, x.w, y.w, z.w, w.w,
        ]
    }

    /// Load into the aligned representation for arithmetic.
    #[inline]
    pub fn to_compute(&self) -> Mat4 {
        Mat4::from_storage(self)
    }

    /// Store an aligned value.
    #[inline]
    pub fn from_compute(m: &Mat4) -> Self {
        m.to_storage()
    }

    #[inline]
    pub fn bits_eq(&self, other: &Self) -> bool {
        bytemuck::bytes_of(self) == bytemuck::bytes_of(other)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x_axis.is_finite()
            && self.y_axis.is_finite()
            && self.z_axis.is_finite()
            && self.w_axis.is_finite()
    }
}
