//! Error types for the V3D encoder.

use thiserror::Error;

/// Main error type for V3D export operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Stream was already closed (centers table flushed)
    #[error("V3D stream is closed")]
    StreamClosed,

    /// An earlier write failed; the stream may end inside a record
    #[error("V3D export aborted after a write failure")]
    Aborted,

    /// Parallel mesh arrays disagree in length
    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Mesh index points past the end of its array
    #[error("Index {index} out of range in {what} (len: {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: u32,
        len: usize,
    },

    /// Value does not fit the 32-bit wire field
    #[error("{what} does not fit in 32 bits: {value}")]
    Overflow { what: &'static str, value: usize },

    /// Rejected encoder configuration
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a shape mismatch error.
    pub fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { what, expected, actual }
    }

    /// Create an overflow error.
    pub fn overflow(what: &'static str, value: usize) -> Self {
        Self::Overflow { what, value }
    }
}

/// Result type alias for V3D operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Narrow a length or index to the u32 wire width.
pub(crate) fn to_u32(what: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::overflow(what, value))
}
