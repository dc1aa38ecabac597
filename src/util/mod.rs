//! Utility types shared by the encoder.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam plus [`BBox3d`] and [`Material`]

mod error;
mod math;

pub use error::*;
pub use math::*;
