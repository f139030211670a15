//! Kind - which geometric entity an element holds.

use super::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Size in bytes of one component. Every entity is single precision.
pub const COMPONENT_BYTES: usize = std::mem::size_of::<f32>();

/// Geometric entity kind, independent of representation.
///
/// Both the compute and the storage type of an entity report the same kind;
/// only their memory layout differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Kind {
    /// 3-component vector (point, direction, color)
    Vec3 = 0,
    /// 4-component vector (homogeneous point, rgba)
    Vec4 = 1,
    /// 3x3 matrix (linear transform)
    Mat3 = 2,
    /// 4x4 matrix (affine or projective transform)
    Mat4 = 3,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 4] = [Kind::Vec3, Kind::Vec4, Kind::Mat3, Kind::Mat4];

    /// Number of `f32` components.
    #[inline]
    pub const fn components(self) -> usize {
        match self {
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }

    /// Size in bytes of one packed element.
    #[inline]
    pub const fn num_bytes(self) -> usize {
        self.components() * COMPONENT_BYTES
    }

    /// Returns true for the vector kinds.
    #[inline]
    pub const fn is_vector(self) -> bool {
        matches!(self, Self::Vec3 | Self::Vec4)
    }

    /// Returns the name of this kind as a string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
        }
    }

    /// Parse a kind from its name. Accepts a few common aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "vec3" | "vec3f" | "float3" => Some(Self::Vec3),
            "vec4" | "vec4f" | "float4" => Some(Self::Vec4),
            "mat3" | "mat3x3" | "mat3x3f" | "float3x3" => Some(Self::Mat3),
            "mat4" | "mat4x4" | "mat4x4f" | "float4x4" => Some(Self::Mat4),
            _ => None,
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_sizes() {
        assert_eq!(Kind::Vec3.num_bytes(), 12);
        assert_eq!(Kind::Vec4.num_bytes(), 16);
        assert_eq!(Kind::Mat3.num_bytes(), 36);
        assert_eq!(Kind::Mat4.num_bytes(), 64);
    }

    #[test]
    fn test_kind_names() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(Kind::from_name("Mat4x4"), Some(Kind::Mat4));
        assert_eq!(Kind::from_name("quat"), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("float3".parse::<Kind>().ok(), Some(Kind::Vec3));
        let err = "vec5".parse::<Kind>().unwrap_err();
        assert!(matches!(err, Error::UnknownKind(ref s) if s == "vec5"));
    }
}
