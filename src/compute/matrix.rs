//! Aligned matrices for arithmetic. Column-major.

use super::{Vec3, Vec4};
use crate::storage::{PackedMat3, PackedMat4};
use bytemuck::Zeroable;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3x3 matrix for arithmetic.
///
/// Columns are SIMD-aligned [`Vec3`]s, so the matrix is 48 bytes with
/// 16-byte alignment. The packed counterpart is [`PackedMat3`] (36 bytes).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Zeroable)]
pub struct Mat3(glam::Mat3A);

/// A 4x4 matrix for arithmetic.
///
/// 16-byte aligned on SIMD targets. The packed counterpart is [`PackedMat4`].
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Zeroable)]
pub struct Mat4(glam::Mat4);

impl Mat3 {
    pub const ZERO: Self = Self(glam::Mat3A::ZERO);
    pub const IDENTITY: Self = Self(glam::Mat3A::IDENTITY);

    #[inline]
    pub fn from_cols(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        Self(glam::Mat3A::from_cols(x_axis.to_glam(), y_axis.to_glam(), z_axis.to_glam()))
    }

    #[inline]
    pub fn from_cols_array(m: &[f32; 9]) -> Self {
        Self(glam::Mat3A::from_cols_array(m))
    }

    /// Build from nine values listed row after row.
    #[inline]
    pub fn from_rows_array(m: &[f32; 9]) -> Self {
        Self(glam::Mat3A::from_cols_array(m).transpose())
    }

    #[inline]
    pub fn to_cols_array(&self) -> [f32; 9] {
        self.0.to_cols_array()
    }

    #[inline]
    pub fn to_rows_array(&self) -> [f32; 9] {
        self.0.transpose().to_cols_array()
    }

    #[inline]
    pub fn from_diagonal(diagonal: Vec3) -> Self {
        Self(glam::Mat3A::from_diagonal(glam::Vec3::from(diagonal.to_glam())))
    }

    /// Non-uniform scale. Same as [`Mat3::from_diagonal`].
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_diagonal(scale)
    }

    /// Rotation of `angle` radians around a normalized `axis`.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self(glam::Mat3A::from_axis_angle(glam::Vec3::from(axis.to_glam()), angle))
    }

    /// Upper-left 3x3 block of a 4x4 matrix.
    #[inline]
    pub fn from_mat4(m: &Mat4) -> Self {
        Self(glam::Mat3A::from_mat4(m.0))
    }

    /// Load from the packed representation.
    #[inline]
    pub fn from_storage(m: &PackedMat3) -> Self {
        Self::from_cols_array(&m.to_cols_array())
    }

    /// Store into the packed representation.
    #[inline]
    pub fn to_storage(&self) -> PackedMat3 {
        PackedMat3::from_cols_array(&self.to_cols_array())
    }

    #[inline]
    pub const fn from_glam(m: glam::Mat3A) -> Self {
        Self(m)
    }

    #[inline]
    pub const fn to_glam(self) -> glam::Mat3A {
        self.0
    }

    /// Column `index`. Panics if `index > 2`.
    #[inline]
    pub fn col(&self, index: usize) -> Vec3 {
        Vec3::from_glam(self.0.col(index))
    }

    /// Row `index`. Panics if `index > 2`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec3 {
        Vec3::from_glam(self.0.row(index))
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Inverse matrix.
    ///
    /// No singularity check: a singular input gives a matrix with infinite or
    /// NaN entries. Use [`Mat3::is_finite`] or [`Mat3::determinant`] when the
    /// input may be degenerate.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.0.determinant()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    #[inline]
    pub fn abs_diff_eq(&self, rhs: Self, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(rhs.0, max_abs_diff)
    }
}

impl Mat4 {
    pub const ZERO: Self = Self(glam::Mat4::ZERO);
    pub const IDENTITY: Self = Self(glam::Mat4::IDENTITY);

    #[inline]
    pub fn from_cols(x_axis: Vec4, y_axis: Vec4, z_axis: Vec4, w_axis: Vec4) -> Self {
        Self(glam::Mat4::from_cols(
            x_axis.to_glam(),
            y_axis.to_glam(),
            z_axis.to_glam(),
            w_axis.to_glam(),
        ))
    }

    #[inline]
    pub fn from_cols_array(m: &[f32; 16]) -> Self {
        Self(glam::Mat4::from_cols_array(m))
    }

    /// Build from sixteen values listed row after row.
    #[inline]
    pub fn from_rows_array(m: &[f32; 16]) -> Self {
        Self(glam::Mat4::from_cols_array(m).transpose())
    }

    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.0.to_cols_array()
    }

    #[inline]
    pub fn to_rows_array(&self) -> [f32; 16] {
        self.0.transpose().to_cols_array()
    }

    #[inline]
    pub fn from_diagonal(diagonal: Vec4) -> Self {
        Self(glam::Mat4::from_diagonal(diagonal.to_glam()))
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self(glam::Mat4::from_translation(glam::Vec3::from(translation.to_glam())))
    }

    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self(glam::Mat4::from_scale(glam::Vec3::from(scale.to_glam())))
    }

    /// Rotation of `angle` radians around a normalized `axis`.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self(glam::Mat4::from_axis_angle(glam::Vec3::from(axis.to_glam()), angle))
    }

    /// Embed a 3x3 linear transform, no translation.
    #[inline]
    pub fn from_mat3(m: &Mat3) -> Self {
        Self(glam::Mat4::from_mat3a(m.0))
    }

    /// Load from the packed representation.
    #[inline]
    pub fn from_storage(m: &PackedMat4) -> Self {
        Self::from_cols_array(&m.to_cols_array())
    }

    /// Store into the packed representation.
    #[inline]
    pub fn to_storage(&self) -> PackedMat4 {
        PackedMat4::from_cols_array(&self.to_cols_array())
    }

    #[inline]
    pub const fn from_glam(m: glam::Mat4) -> Self {
        Self(m)
    }

    #[inline]
    pub const fn to_glam(self) -> glam::Mat4 {
        self.0
    }

    /// Column `index`. Panics if `index > 3`.
    #[inline]
    pub fn col(&self, index: usize) -> Vec4 {
        Vec4::from_glam(self.0.col(index))
    }

    /// Row `index`. Panics if `index > 3`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec4 {
        Vec4::from_glam(self.0.row(index))
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Inverse matrix.
    ///
    /// No singularity check: a singular input gives a matrix with infinite or
    /// NaN entries. Use [`Mat4::is_finite`] or [`Mat4::determinant`] when the
    /// input may be degenerate.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.0.determinant()
    }

    /// Transform a point (implicit `w = 1`), no perspective divide.
    #[inline]
    pub fn transform_point3(&self, p: Vec3) -> Vec3 {
        Vec3::from_glam(self.0.transform_point3a(p.to_glam()))
    }

    /// Transform a direction (implicit `w = 0`), translation ignored.
    #[inline]
    pub fn transform_vector3(&self, v: Vec3) -> Vec3 {
        Vec3::from_glam(self.0.transform_vector3a(v.to_glam()))
    }

    /// Transform a point and divide by the resulting `w`.
    ///
    /// `w == 0` yields infinite or NaN components.
    #[inline]
    pub fn project_point3(&self, p: Vec3) -> Vec3 {
        let projected = self.0.project_point3(glam::Vec3::from(p.to_glam()));
        Vec3::new(projected.x, projected.y, projected.z)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    #[inline]
    pub fn abs_diff_eq(&self, rhs: Self, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(rhs.0, max_abs_diff)
    }
}

// Operators shared by both matrix types.
//
// `*=` on matrices is the textbook aliasing hazard: writing entries of the
// product into the left operand while later entries still read from it
// corrupts the result. Every compound assignment here evaluates the whole
// right-hand side into a temporary and assigns once, so `a *= a` and
// `a *= b` are both exact.
macro_rules! impl_matrix_ops {
    ($t:ident, $v:ident) => {
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

        impl Neg for $t {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul for $t {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self(self.0 * rhs.0)
            }
        }

        impl Mul<$v> for $t {
            type Output = $v;
            #[inline]
            fn mul(self, rhs: $v) -> $v {
                $v::from_glam(self.0 * rhs.to_glam())
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

        /// `a *= b` is `a = a * b`, evaluated into a temporary first.
        impl MulAssign for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                let product = *self * rhs;
                *self = product;
            }
        }

        impl MulAssign<f32> for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                let scaled = *self * rhs;
                *self = scaled;
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

        impl Default for $t {
            /// Zero matrix.
            #[inline]
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl fmt::Debug for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{:?}", stringify!($t), self.to_rows_array())
            }
        }
    };
}

impl_matrix_ops!(Mat3, Vec3);
impl_matrix_ops!(Mat4, Vec4);

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Mat3::default(), Mat3::ZERO);
        assert_eq!(Mat4::default(), Mat4::ZERO);
    }

    #[test]
    fn test_row_major_constructor() {
        let m = Mat3::from_rows_array(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(m.row(0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.col(0), Vec3::new(1.0, 4.0, 7.0));
        assert_eq!(m.to_rows_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(m.transpose().to_cols_array(), m.to_rows_array());
    }

    #[test]
    fn test_mat4_transform() {
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_vector3(Vec3::X), Vec3::X);

        let r = Mat4::from_axis_angle(Vec3::Z, FRAC_PI_2);
        assert!(r.transform_vector3(Vec3::X).abs_diff_eq(Vec3::Y, 1e-6));

        let s = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(s * Vec4::new(1.0, 1.0, 1.0, 1.0), Vec4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn test_inverse() {
        let m = Mat4::from_translation(Vec3::new(1.0, -2.0, 0.5))
            * Mat4::from_axis_angle(Vec3::new(0.0, 0.6, 0.8), 0.3)
            * Mat4::from_scale(Vec3::splat(2.0));
        assert!((m * m.inverse()).abs_diff_eq(Mat4::IDENTITY, 1e-5));

        let n = Mat3::from_mat4(&m);
        assert!((n.inverse() * n).abs_diff_eq(Mat3::IDENTITY, 1e-5));
    }

    #[test]
    fn test_singular_inverse_is_not_finite() {
        assert!(!Mat4::ZERO.inverse().is_finite());
        assert!(!Mat3::from_scale(Vec3::new(1.0, 0.0, 1.0)).inverse().is_finite());
        assert_eq!(Mat3::ZERO.determinant(), 0.0);
    }

    #[test]
    fn test_mul_assign_self() {
        let mut m = Mat3::from_axis_angle(Vec3::Y, 0.4) * Mat3::from_scale(Vec3::new(1.0, 2.0, 3.0));
        let expected = m * m;
        m *= m;
        assert_eq!(m, expected);
    }

    fn sample_mat3() -> (Mat3, Mat3) {
        let a = Mat3::from_cols_array(&[1.0, -2.0, 3.5, 0.25, 4.0, -1.0, 2.0, 0.5, -3.0]);
        let b = Mat3::from_cols_array(&[-0.5, 1.5, 2.0, 3.0, -1.0, 0.75, 1.0, 2.0, -4.0]);
        (a, b)
    }

    fn sample_mat4() -> (Mat4, Mat4) {
        let a = Mat4::from_cols_array(&[
            1.0, -2.0, 3.5, 0.5, 0.25, 4.0, -1.0, 2.0, 2.0, 0.5, -3.0, 1.0, -1.0, 0.0, 2.5, 1.0,
        ]);
        let b = Mat4::from_cols_array(&[
            -0.5, 1.5, 2.0, 0.0, 3.0, -1.0, 0.75, 1.0, 1.0, 2.0, -4.0, 0.5, 0.5, -1.5, 1.0, 2.0,
        ]);
        (a, b)
    }

    #[test]
    fn test_mat3_elementwise_ops() {
        let (a, b) = sample_mat3();
        let (ac, bc) = (a.to_cols_array(), b.to_cols_array());

        let sum = (a + b).to_cols_array();
        let diff = (a - b).to_cols_array();
        let neg = (-a).to_cols_array();
        let scaled = (a * 2.5).to_cols_array();
        let scaled_left = (2.5 * a).to_cols_array();
        for i in 0..9 {
            assert_eq!(sum[i], ac[i] + bc[i]);
            assert_eq!(diff[i], ac[i] - bc[i]);
            assert_eq!(neg[i], -ac[i]);
            assert_eq!(scaled[i], ac[i] * 2.5);
            assert_eq!(scaled_left[i], ac[i] * 2.5);
        }
    }

    #[test]
    fn test_mat4_elementwise_ops() {
        let (a, b) = sample_mat4();
        let (ac, bc) = (a.to_cols_array(), b.to_cols_array());

        let sum = (a + b).to_cols_array();
        let diff = (a - b).to_cols_array();
        let neg = (-a).to_cols_array();
        let scaled = (a * -0.5).to_cols_array();
        let scaled_left = (-0.5 * a).to_cols_array();
        for i in 0..16 {
            assert_eq!(sum[i], ac[i] + bc[i]);
            assert_eq!(diff[i], ac[i] - bc[i]);
            assert_eq!(neg[i], -ac[i]);
            assert_eq!(scaled[i], ac[i] * -0.5);
            assert_eq!(scaled_left[i], ac[i] * -0.5);
        }
    }

    #[test]
    fn test_compound_assign_matches_binary() {
        let (a, b) = sample_mat3();
        let mut m = a;
        m += b;
        assert_eq!(m, a + b);
        m -= b;
        assert_eq!(m, a + b - b);
        m *= 3.0;
        assert_eq!(m, (a + b - b) * 3.0);

        let (c, d) = sample_mat4();
        let mut n = c;
        n += d;
        assert_eq!(n, c + d);
        n -= d;
        assert_eq!(n, c + d - d);
        n *= 3.0;
        assert_eq!(n, (c + d - d) * 3.0);
    }

    #[test]
    fn test_compound_assign_self_operand() {
        let (a, _) = sample_mat3();
        let mut m = a;
        m += m;
        assert_eq!(m, a * 2.0);
        m -= m;
        assert_eq!(m, Mat3::ZERO);

        let (c, _) = sample_mat4();
        let mut n = c;
        n += n;
        assert_eq!(n, c * 2.0);
        n -= n;
        assert_eq!(n, Mat4::ZERO);

        let mut p = c;
        p *= p;
        assert_eq!(p, c * c);
    }

    #[test]
    fn test_projection_divides_by_w() {
        let mut cols = Mat4::IDENTITY.to_cols_array();
        cols[15] = 2.0;
        let m = Mat4::from_cols_array(&cols);
        assert_eq!(m.project_point3(Vec3::new(2.0, 4.0, 6.0)), Vec3::new(1.0, 2.0, 3.0));
    }
}
