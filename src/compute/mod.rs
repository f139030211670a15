//! Compute representation: aligned types for arithmetic.
//!
//! These wrap glam's SIMD types. They may be padded (`Vec3` is 16 bytes,
//! `Mat3` is 48) and are deliberately not `Pod`, so they cannot be cast to
//! bytes and shipped to another memory domain by accident. Use the
//! [`crate::storage`] types for buffers and convert explicitly with
//! `to_storage` / `from_storage`.
//!
//! ## Degenerate inputs
//!
//! Nothing here returns an error. `normalize` on a zero vector and `inverse`
//! on a singular matrix produce NaN/Infinity, which propagate through later
//! arithmetic. Kernels are expected to test `is_finite` where it matters.
//!
//! ## Aliasing
//!
//! Compound assignments (`*=`, `+=`, `-=`, `/=`) always compute the full result
//! into a temporary before assigning, so an operand may appear on both sides:
//!
//! ```
//! use helion_geometry::compute::{Mat4, Vec3};
//!
//! let mut a = Mat4::from_axis_angle(Vec3::Y, 0.5);
//! let b = a * a;
//! a *= a;
//! assert_eq!(a, b);
//! ```

mod bounds;
mod matrix;
mod vector;

pub use bounds::Bounds3;
pub use matrix::{Mat3, Mat4};
pub use vector::{Vec3, Vec4};
