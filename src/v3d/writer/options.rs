//! Encoder configuration.

use super::constants::{DEFAULT_BUFFER_CAPACITY, MAX_COMPRESSION, NO_COMPRESSION};
use crate::util::{Error, Result};
use crate::v3d::format::V3D_VERSION;

/// How the destination file is opened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpenMode {
    /// Create or truncate.
    #[default]
    Truncate,
    /// Create or append after existing content.
    Append,
}

/// Options for [`V3dFile`](super::V3dFile) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncoderOptions {
    open_mode: OpenMode,
    compression_hint: i32,
    buffer_capacity: usize,
    version: u32,
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self {
            open_mode: OpenMode::Truncate,
            compression_hint: NO_COMPRESSION,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            version: V3D_VERSION,
        }
    }

    /// Set how the destination is opened.
    pub fn open_mode(mut self, mode: OpenMode) -> Self {
        self.open_mode = mode;
        self
    }

    /// Set compression hint (-1 = no compression, 0-9 = gzip level).
    pub fn compression_hint(mut self, hint: i32) -> Self {
        self.compression_hint = hint.clamp(NO_COMPRESSION, MAX_COMPRESSION);
        self
    }

    /// Set the output buffer size for file destinations.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Override the format version scalar.
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn get_open_mode(&self) -> OpenMode {
        self.open_mode
    }

    pub fn get_compression_hint(&self) -> i32 {
        self.compression_hint
    }

    /// Gzip level, or `None` for plain output.
    pub fn gzip_level(&self) -> Option<u32> {
        u32::try_from(self.compression_hint).ok()
    }

    pub fn get_buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    pub fn get_version(&self) -> u32 {
        self.version
    }

    /// Reject option combinations that cannot open a stream.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(Error::InvalidOption("buffer capacity must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self::new()
    }
}
