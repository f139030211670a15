//! The bridge between the compute and storage representations.
//!
//! [`ToCompute`] and [`ToStorage`] are the only ways across. There are no
//! `From`/`Into` impls between the families, so every crossing names its
//! direction at the call site. Conversions are total and copy float for
//! float; a round trip is bit-exact.

use crate::compute::{Mat3, Mat4, Vec3, Vec4};
use crate::storage::{PackedMat3, PackedMat4, PackedVec3, PackedVec4};
use crate::util::{Error, Result};
use rayon::prelude::*;

/// Implemented by storage types: load into the aligned representation.
pub trait ToCompute: Copy {
    type Compute: ToStorage<Storage = Self>;

    fn to_compute(&self) -> Self::Compute;
}

/// Implemented by compute types: store into the packed representation.
pub trait ToStorage: Copy {
    type Storage: Copy;

    fn to_storage(&self) -> Self::Storage;
}

macro_rules! impl_conversion {
    ($packed:ident, $compute:ident) => {
        impl ToCompute for $packed {
            type Compute = $compute;

            #[inline]
            fn to_compute(&self) -> $compute {
                $compute::from_storage(self)
            }
        }

        impl ToStorage for $compute {
            type Storage = $packed;

            #[inline]
            fn to_storage(&self) -> $packed {
                $packed::from_compute(self)
            }
        }
    };
}

impl_conversion!(PackedVec3, Vec3);
impl_conversion!(PackedVec4, Vec4);
impl_conversion!(PackedMat3, Mat3);
impl_conversion!(PackedMat4, Mat4);

/// Storage -> compute.
#[inline]
pub fn to_compute<S: ToCompute>(value: S) -> S::Compute {
    value.to_compute()
}

/// Compute -> storage.
#[inline]
pub fn to_storage<C: ToStorage>(value: C) -> C::Storage {
    value.to_storage()
}

/// Load a whole packed slice.
pub fn to_compute_vec<S: ToCompute>(src: &[S]) -> Vec<S::Compute> {
    src.iter().map(ToCompute::to_compute).collect()
}

/// Pack a whole compute slice.
pub fn to_storage_vec<C: ToStorage>(src: &[C]) -> Vec<C::Storage> {
    src.iter().map(ToStorage::to_storage).collect()
}

/// Pack `src` into an existing buffer of the same length.
pub fn store_into<C: ToStorage>(src: &[C], dst: &mut [C::Storage]) -> Result<()> {
    if src.len() != dst.len() {
        return Err(Error::LengthMismatch {
            expected: src.len(),
            actual: dst.len(),
        });
    }
    for (slot, value) in dst.iter_mut().zip(src) {
        *slot = value.to_storage();
    }
    Ok(())
}

/// Parallel [`to_compute_vec`].
#[tracing::instrument(skip_all, fields(count = src.len()))]
pub fn par_to_compute_vec<S>(src: &[S]) -> Vec<S::Compute>
where
    S: ToCompute + Sync,
    S::Compute: Send,
{
    src.par_iter().map(ToCompute::to_compute).collect()
}

/// Parallel [`to_storage_vec`].
#[tracing::instrument(skip_all, fields(count = src.len()))]
pub fn par_to_storage_vec<C>(src: &[C]) -> Vec<C::Storage>
where
    C: ToStorage + Sync,
    C::Storage: Send,
{
    src.par_iter().map(ToStorage::to_storage).collect()
}
