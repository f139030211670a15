//! Contiguous buffers of packed elements.
//!
//! File format: raw little-endian `f32` components, element after element,
//! no header. The element kind is not recorded; the reader must know it.

use super::Packed;
use crate::convert::{ToCompute, ToStorage};
use crate::util::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::mem::size_of;
use std::ops::Deref;
use std::path::Path;
use tracing::debug;

/// Owned, contiguous array of packed elements.
///
/// The backing memory is exactly `len() * stride()` bytes with no gaps, so
/// [`PackedBuffer::as_bytes`] can go straight to a device upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedBuffer<T: Packed> {
    data: Vec<T>,
}

impl<T: Packed> PackedBuffer<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Pack a slice of compute values.
    pub fn from_compute(values: &[T::Compute]) -> Self {
        Self {
            data: values.iter().map(ToStorage::to_storage).collect(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes per element. Equal to `T::KIND.num_bytes()`.
    #[inline]
    pub const fn stride() -> usize {
        size_of::<T>()
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.data.len() * Self::stride()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Native-endian view of the whole buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    pub fn push_compute(&mut self, value: T::Compute) {
        self.data.push(value.to_storage());
    }

    /// Load element `index` for arithmetic.
    #[inline]
    pub fn load(&self, index: usize) -> Option<T::Compute> {
        self.data.get(index).map(ToCompute::to_compute)
    }

    /// Store a compute value at `index`.
    pub fn store(&mut self, index: usize, value: T::Compute) -> Result<()> {
        let count = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, count })?;
        *slot = value.to_storage();
        Ok(())
    }

    pub fn iter_compute(&self) -> impl Iterator<Item = T::Compute> + '_ {
        self.data.iter().map(ToCompute::to_compute)
    }

    /// Replace every element with `f(element)`.
    ///
    /// Each element is loaded into a compute temporary, transformed and stored
    /// back; the closure never sees a half-written element.
    pub fn map_in_place(&mut self, mut f: impl FnMut(T::Compute) -> T::Compute) {
        for slot in &mut self.data {
            let value = slot.to_compute();
            *slot = f(value).to_storage();
        }
    }

    /// Parallel [`PackedBuffer::map_in_place`]. Workers own disjoint elements.
    #[tracing::instrument(skip_all, fields(kind = %T::KIND, count = self.data.len()))]
    pub fn par_map_in_place<F>(&mut self, f: F)
    where
        F: Fn(T::Compute) -> T::Compute + Sync + Send,
    {
        self.data.par_iter_mut().for_each(|slot| {
            let value = slot.to_compute();
            *slot = f(value).to_storage();
        });
    }

    /// Decode little-endian bytes. Any input alignment is accepted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let stride = Self::stride();
        if bytes.len() % stride != 0 {
            return Err(Error::InvalidLength {
                len: bytes.len(),
                stride,
            });
        }
        let mut data = vec![T::zeroed(); bytes.len() / stride];
        let components: &mut [f32] = bytemuck::try_cast_slice_mut(&mut data)?;
        LittleEndian::read_f32_into(bytes, components);
        Ok(Self { data })
    }

    /// Encode as little-endian bytes.
    pub fn to_le_bytes(&self) -> Result<Vec<u8>> {
        let components: &[f32] = bytemuck::try_cast_slice(&self.data)?;
        let mut bytes = vec![0u8; components.len() * size_of::<f32>()];
        LittleEndian::write_f32_into(components, &mut bytes);
        Ok(bytes)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.to_le_bytes()?)?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Write the buffer to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!(
            "save {} x {} ({} bytes) to {}",
            self.len(),
            T::KIND,
            self.byte_len(),
            path.display()
        );
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Memory-map `path` and decode it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        let size = file.metadata()?.len();
        if size == 0 {
            debug!("open {}: empty file", path.display());
            return Ok(Self::new());
        }

        // Safety: the mapping is read-only and dropped before returning.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::MmapFailed(e.to_string()))?;
        let buffer = Self::decode_mapped(&mmap)?;
        debug!(
            "open {}: {} x {} ({} bytes)",
            path.display(),
            buffer.len(),
            T::KIND,
            size
        );
        Ok(buffer)
    }

    /// Cast straight from the mapping when host byte order matches the file
    /// and the bytes are aligned for `T`; decode component by component
    /// otherwise.
    fn decode_mapped(bytes: &[u8]) -> Result<Self> {
        #[cfg(target_endian = "little")]
        {
            if let Ok(items) = bytemuck::try_cast_slice::<u8, T>(bytes) {
                return Ok(Self {
                    data: items.to_vec(),
                });
            }
        }
        Self::from_bytes(bytes)
    }
}

impl<T: Packed> Deref for PackedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T: Packed> FromIterator<T> for PackedBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{Mat4, Vec3};
    use crate::storage::{PackedMat3, PackedVec3};

    fn sample_points() -> PackedBuffer<PackedVec3> {
        (0..10)
            .map(|i| PackedVec3::new(i as f32, -(i as f32), 0.5 * i as f32))
            .collect()
    }

    #[test]
    fn test_stride_and_byte_len() {
        let buf = sample_points();
        assert_eq!(PackedBuffer::<PackedVec3>::stride(), 12);
        assert_eq!(PackedBuffer::<PackedMat3>::stride(), 36);
        assert_eq!(buf.byte_len(), 120);
        assert_eq!(buf.as_bytes().len(), 120);
    }

    #[test]
    fn test_le_bytes_layout() {
        let buf = PackedBuffer::from_vec(vec![PackedVec3::new(1.0, 2.0, 3.0)]);
        let bytes = buf.to_le_bytes().unwrap();
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[8..12], &3.0f32.to_le_bytes());
    }

    #[test]
    fn test_from_bytes_unaligned() {
        let buf = sample_points();
        let bytes = buf.to_le_bytes().unwrap();
        let mut shifted = vec![0u8; 1];
        shifted.extend_from_slice(&bytes);
        let back = PackedBuffer::<PackedVec3>::from_bytes(&shifted[1..]).unwrap();
        assert_eq!(back, buf);
    }

    #[test]
    fn test_from_bytes_invalid_length() {
        let err = PackedBuffer::<PackedVec3>::from_bytes(&[0u8; 13]).unwrap_err();
        assert!(matches!(err, Error::InvalidLength { len: 13, stride: 12 }));
    }

    #[test]
    fn test_load_store() {
        let mut buf = sample_points();
        let p = buf.load(3).unwrap();
        assert_eq!(p, Vec3::new(3.0, -3.0, 1.5));
        buf.store(3, p * 2.0).unwrap();
        assert_eq!(buf[3], PackedVec3::new(6.0, -6.0, 3.0));
        assert!(buf.load(10).is_none());
        assert!(matches!(
            buf.store(10, p),
            Err(Error::IndexOutOfBounds { index: 10, count: 10 })
        ));
    }

    #[test]
    fn test_par_map_matches_serial() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::from_axis_angle(Vec3::Y, 0.7);
        let mut serial = sample_points();
        let mut parallel = serial.clone();
        serial.map_in_place(|p| m.transform_point3(p));
        parallel.par_map_in_place(|p| m.transform_point3(p));
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_decode_mapped_aligned_and_unaligned() {
        let buf = sample_points();
        let bytes = buf.to_le_bytes().unwrap();

        // f32-aligned backing store takes the cast path on little-endian hosts.
        let words: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        let aligned: &[u8] = bytemuck::cast_slice(&words);
        assert_eq!(PackedBuffer::<PackedVec3>::decode_mapped(aligned).unwrap(), buf);

        let mut shifted = vec![0u8; 1];
        shifted.extend_from_slice(&bytes);
        assert_eq!(PackedBuffer::<PackedVec3>::decode_mapped(&shifted[1..]).unwrap(), buf);

        let err = PackedBuffer::<PackedVec3>::decode_mapped(&bytes[..bytes.len() - 2]).unwrap_err();
        assert!(matches!(err, Error::InvalidLength { len: 118, stride: 12 }));
    }

    #[test]
    fn test_read_write_stream() {
        let buf = sample_points();
        let mut bytes = Vec::new();
        buf.write_to(&mut bytes).unwrap();
        let back = PackedBuffer::<PackedVec3>::read_from(bytes.as_slice()).unwrap();
        assert_eq!(back, buf);
    }
}
