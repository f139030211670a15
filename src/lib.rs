//! # helion-geometry
//!
//! Vector and matrix value types for the Helion path tracer, in two
//! representations that differ only in memory layout:
//!
//! - [`compute`] - SIMD-aligned [`Vec3`], [`Vec4`], [`Mat3`], [`Mat4`] for
//!   arithmetic in hot paths (ray math, transform composition, BSDFs).
//! - [`storage`] - packed [`PackedVec3`], [`PackedVec4`], [`PackedMat3`],
//!   [`PackedMat4`] for vertex/accumulation buffers, files and accelerator
//!   uploads.
//!
//! Crossing between them is always explicit ([`convert`]). The same logical
//! value gives the same numbers in both; only padding and alignment differ.
//!
//! ## Modules
//!
//! - [`util`] - [`Kind`], layout reports, errors
//! - [`compute`] - aligned types and [`compute::Bounds3`]
//! - [`storage`] - packed types and [`PackedBuffer`]
//! - [`convert`] - [`ToCompute`] / [`ToStorage`] and bulk helpers
//!
//! ## Example
//!
//! ```
//! use helion_geometry::prelude::*;
//!
//! let stored = PackedVec3::new(1.0, 2.0, 3.0);
//! let moved = Mat4::IDENTITY.transform_point3(stored.to_compute());
//! assert!(moved.to_storage().bits_eq(&stored));
//! ```

pub mod compute;
pub mod convert;
pub mod storage;
pub mod util;

// Re-export commonly used types
pub use compute::{Bounds3, Mat3, Mat4, Vec3, Vec4};
pub use convert::{to_compute, to_storage, ToCompute, ToStorage};
pub use storage::{PackedBuffer, PackedMat3, PackedMat4, PackedVec3, PackedVec4};
pub use util::{Error, Kind, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::compute::{Bounds3, Mat3, Mat4, Vec3, Vec4};
    pub use crate::convert::{to_compute, to_storage, ToCompute, ToStorage};
    pub use crate::storage::{Packed, PackedBuffer, PackedMat3, PackedMat4, PackedVec3, PackedVec4};
    pub use crate::util::{Error, Kind, Result};
}
