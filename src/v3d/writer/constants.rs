//! V3D writer defaults.

/// Output buffer size for file destinations.
pub(crate) const DEFAULT_BUFFER_CAPACITY: usize = 2 * 1024 * 1024; // 2MB

/// Compression hint meaning "write plain XDR".
pub(crate) const NO_COMPRESSION: i32 = -1;

/// Highest accepted gzip level.
pub(crate) const MAX_COMPRESSION: i32 = 9;
