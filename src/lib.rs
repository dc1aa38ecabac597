//! # V3D
//!
//! Encoder for the V3D binary 3D vector-graphics scene format: Bezier
//! patches and triangles, indexed triangle meshes, curves, pixels, simple
//! solids and materials, written as a compact tagged stream for a WebGL
//! renderer.
//!
//! ## Modules
//!
//! - [`util`] - Math types and errors
//! - [`v3d`] - Format tags and the writer
//!
//! ## Example
//!
//! ```ignore
//! use v3d::prelude::*;
//!
//! let scene = SharedScene::new();
//! let options = EncoderOptions::default();
//! let mut file = V3dFile::create_with_options("scene.v3d", &options, scene.clone())?;
//!
//! scene.set_material_index(0);
//! file.add_sphere(DVec3::ZERO, 1.0)?;
//! file.close()?;
//! ```

pub mod util;
pub mod v3d;

// Re-export commonly used types
pub use util::{Error, Result};
pub use v3d::{V3dFile, V3dType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{BBox3d, DVec3, Error, IndexTriple, Material, Result, Rgba, Vec4};
    pub use crate::v3d::{
        EncoderOptions, OpenMode, Record, SceneExporter, SharedScene, TriangleIndexType,
        TriangleMesh, V3dFile, V3dType,
    };
}
