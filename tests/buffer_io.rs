//! Packed buffers written to disk and read back.

use helion_geometry::prelude::*;
use tempfile::NamedTempFile;

fn mesh_positions() -> PackedBuffer<PackedVec3> {
    let mut buf = PackedBuffer::with_capacity(64);
    for i in 0..64 {
        let t = i as f32 * 0.1;
        buf.push_compute(Vec3::new(t.cos(), t.sin(), t));
    }
    buf
}

#[test]
fn test_save_open_roundtrip() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let path = temp.path();

    let buf = mesh_positions();
    buf.save(path).expect("Failed to save buffer");

    let on_disk = std::fs::metadata(path).expect("metadata").len() as usize;
    assert_eq!(on_disk, 64 * 12, "file must be exactly N * stride bytes");

    let back = PackedBuffer::<PackedVec3>::open(path).expect("Failed to open buffer");
    assert_eq!(back.len(), buf.len());
    for (a, b) in back.iter().zip(buf.iter()) {
        assert!(a.bits_eq(b));
    }
}

#[test]
fn test_file_is_little_endian_components() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let buf = PackedBuffer::from_vec(vec![PackedMat4::IDENTITY]);
    buf.save(temp.path()).expect("Failed to save buffer");

    let bytes = std::fs::read(temp.path()).expect("read");
    let mut expected = Vec::new();
    for c in PackedMat4::IDENTITY.to_cols_array() {
        expected.extend_from_slice(&c.to_le_bytes());
    }
    assert_eq!(bytes, expected);
}

#[test]
fn test_open_rejects_truncated_file() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(temp.path(), [0u8; 30]).expect("write");

    let err = PackedBuffer::<PackedVec4>::open(temp.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidLength { len: 30, stride: 16 }));
}

#[test]
fn test_open_empty_file() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let buf = PackedBuffer::<PackedMat3>::open(temp.path()).expect("empty file is a valid buffer");
    assert!(buf.is_empty());
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.bin");
    let err = PackedBuffer::<PackedVec3>::open(&path).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(ref p) if p == &path));
}

#[test]
fn test_transform_file_in_place() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    mesh_positions().save(temp.path()).expect("save");

    let mut buf = PackedBuffer::<PackedVec3>::open(temp.path()).expect("open");
    let m = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
    buf.par_map_in_place(|p| m.transform_point3(p));
    buf.save(temp.path()).expect("save");

    let back = PackedBuffer::<PackedVec3>::open(temp.path()).expect("open");
    let first = back.load(0).expect("first element");
    assert_eq!(first, Vec3::new(1.0, 0.0, -10.0));

    let bounds: Bounds3 = back.iter_compute().collect();
    assert!(bounds.max.z() < -3.6);
}
