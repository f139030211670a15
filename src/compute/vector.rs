//! Aligned vectors for arithmetic.

use crate::storage::{PackedVec3, PackedVec4};
use bytemuck::Zeroable;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// A 3-component vector for arithmetic.
///
/// Backed by a 128-bit SIMD lane: 16 bytes, 16-byte aligned, with 4 bytes of
/// padding. Do not put it in buffers that leave the process; use
/// [`PackedVec3`] there.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable)]
pub struct Vec3(glam::Vec3A);

/// A 4-component vector for arithmetic.
///
/// 16-byte aligned on SIMD targets. The packed counterpart is [`PackedVec4`].
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable)]
pub struct Vec4(glam::Vec4);

impl Vec3 {
    pub const ZERO: Self = Self(glam::Vec3A::ZERO);
    pub const ONE: Self = Self(glam::Vec3A::ONE);
    pub const X: Self = Self(glam::Vec3A::X);
    pub const Y: Self = Self(glam::Vec3A::Y);
    pub const Z: Self = Self(glam::Vec3A::Z);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(glam::Vec3A::new(x, y, z))
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self(glam::Vec3A::splat(v))
    }

    #[inline]
    pub fn from_array(a: [f32; 3]) -> Self {
        Self(glam::Vec3A::from_array(a))
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        self.0.to_array()
    }

    /// Load from the packed representation.
    #[inline]
    pub fn from_storage(v: &PackedVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Store into the packed representation.
    #[inline]
    pub fn to_storage(&self) -> PackedVec3 {
        PackedVec3::new(self.0.x, self.0.y, self.0.z)
    }

    #[inline]
    pub const fn from_glam(v: glam::Vec3A) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn to_glam(self) -> glam::Vec3A {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.0.z
    }

    #[inline]
    pub fn dot(&self, rhs: Self) -> f32 {
        self.0.dot(rhs.0)
    }

    #[inline]
    pub fn cross(&self, rhs: Self) -> Self {
        Self(self.0.cross(rhs.0))
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.0.length()
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.0.length_squared()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length input yields NaN components (`0 * inf`). Callers that can
    /// see degenerate vectors must check [`Vec3::is_finite`].
    #[inline]
    pub fn normalize(&self) -> Self {
        Self(self.0 * self.length().recip())
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(&self, rhs: Self) -> Self {
        Self(self.0.min(rhs.0))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(&self, rhs: Self) -> Self {
        Self(self.0.max(rhs.0))
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }

    #[inline]
    pub fn abs_diff_eq(&self, rhs: Self, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(rhs.0, max_abs_diff)
    }

    /// Append a `w` component.
    #[inline]
    pub fn extend(&self, w: f32) -> Vec4 {
        Vec4(self.0.extend(w))
    }
}

impl Vec4 {
    pub const ZERO: Self = Self(glam::Vec4::ZERO);
    pub const ONE: Self = Self(glam::Vec4::ONE);
    pub const X: Self = Self(glam::Vec4::X);
    pub const Y: Self = Self(glam::Vec4::Y);
    pub const Z: Self = Self(glam::Vec4::Z);
    pub const W: Self = Self(glam::Vec4::W);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self(glam::Vec4::new(x, y, z, w))
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self(glam::Vec4::splat(v))
    }

    #[inline]
    pub fn from_array(a: [f32; 4]) -> Self {
        Self(glam::Vec4::from_array(a))
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        self.0.to_array()
    }

    /// Load from the packed representation.
    #[inline]
    pub fn from_storage(v: &PackedVec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Store into the packed representation.
    #[inline]
    pub fn to_storage(&self) -> PackedVec4 {
        PackedVec4::new(self.0.x, self.0.y, self.0.z, self.0.w)
    }

    #[inline]
    pub const fn from_glam(v: glam::Vec4) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn to_glam(self) -> glam::Vec4 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.0.z
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.0.w
    }

    #[inline]
    pub fn dot(&self, rhs: Self) -> f32 {
        self.0.dot(rhs.0)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.0.length()
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.0.length_squared()
    }

    /// Unit vector in the same direction. Zero-length input yields NaN.
    #[inline]
    pub fn normalize(&self) -> Self {
        Self(self.0 * self.length().recip())
    }

    #[inline]
    pub fn min(&self, rhs: Self) -> Self {
        Self(self.0.min(rhs.0))
    }

    #[inline]
    pub fn max(&self, rhs: Self) -> Self {
        Self(self.0.max(rhs.0))
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }

    #[inline]
    pub fn abs_diff_eq(&self, rhs: Self, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(rhs.0, max_abs_diff)
    }

    /// Drop the `w` component.
    #[inline]
    pub fn truncate(&self) -> Vec3 {
        Vec3::new(self.0.x, self.0.y, self.0.z)
    }
}

// Operators shared by both vector types. Compound assignments build the full
// result before writing it back.
macro_rules! impl_vector_ops {
    ($t:ty) => {
        impl Add for $t {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $t {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        /// Component-wise product (e.g. color modulation).
        impl Mul for $t {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self(self.0 * rhs.0)
            }
        }

        impl Mul<f32> for $t {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$t> for f32 {
            type Output = $t;
            #[inline]
            fn mul(self, rhs: $t) -> $t {
                rhs * self
            }
        }

        impl Div<f32> for $t {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f32) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl Neg for $t {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl AddAssign for $t {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                let sum = *self + rhs;
                *self = sum;
            }
        }

        impl SubAssign for $t {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                let diff = *self - rhs;
                *self = diff;
            }
        }

        impl MulAssign<f32> for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                let scaled = *self * rhs;
                *self = scaled;
            }
        }

        impl DivAssign<f32> for $t {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                let scaled = *self / rhs;
                *self = scaled;
            }
        }

        impl Index<usize> for $t {
            type Output = f32;
            #[inline]
            fn index(&self, index: usize) -> &f32 {
                &self.0[index]
            }
        }

        impl IndexMut<usize> for $t {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut f32 {
                &mut self.0[index]
            }
        }
    };
}

impl_vector_ops!(Vec3);
impl_vector_ops!(Vec4);

impl fmt::Debug for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec3({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

impl fmt::Debug for Vec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec4({}, {}, {}, {})", self.0.x, self.0.y, self.0.z, self.0.w)
    }
}
