//! Error types for packed buffer handling.
//!
//! Arithmetic and representation conversions never fail; only the byte-level
//! plumbing around storage buffers does.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for buffer operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Byte length is not a whole number of elements
    #[error("Invalid buffer length: {len} bytes is not a multiple of the {stride}-byte element stride")]
    InvalidLength { len: usize, stride: usize },

    /// Destination slice has the wrong number of elements
    #[error("Length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Element index out of bounds
    #[error("Element index {index} out of bounds (count: {count})")]
    IndexOutOfBounds { index: usize, count: usize },

    /// Zero-copy cast rejected the slice (alignment or size)
    #[error("Cast failed: {0}")]
    Cast(bytemuck::PodCastError),

    /// Unrecognized element kind name
    #[error("Unknown element kind: {0}")]
    UnknownKind(String),

    /// Memory mapping failed
    #[error("Memory mapping failed: {0}")]
    MmapFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<bytemuck::PodCastError> for Error {
    fn from(e: bytemuck::PodCastError) -> Self {
        Self::Cast(e)
    }
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Result type alias for buffer operations.
pub type Result<T> = std::result::Result<T, Error>;
