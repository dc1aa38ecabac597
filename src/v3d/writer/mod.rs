//! V3D format writer implementation.
//!
//! Split into the XDR scalar stream, composite geometry helpers, the record
//! sum type and the file-level encoder.

mod constants;
mod exporter;
mod file;
mod options;
mod record;
mod scene;
mod stream;
mod write_util;

pub use exporter::SceneExporter;
pub use file::{EncoderStats, V3dFile};
pub use options::{EncoderOptions, OpenMode};
pub use record::{Record, TriangleMesh};
pub use scene::{SceneState, SharedScene};
pub use stream::XdrStream;
pub use write_util::IndexStamp;

#[cfg(test)]
mod tests;
