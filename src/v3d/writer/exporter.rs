//! Scene exporter interface.
//!
//! The scene traversal drives any exporter through this trait; the binary
//! V3D encoder is one implementation.

use super::record::TriangleMesh;
use crate::util::{BBox3d, DVec3, Material, Result, Rgba};

/// Per-primitive export operations.
pub trait SceneExporter {
    /// Set output precision in significant digits. Binary exporters
    /// write full precision and ignore it.
    fn precision(&mut self, _digits: usize) {}

    fn add_material(&mut self, mat: &Material) -> Result<()>;

    /// Bicubic Bezier patch (16 controls), optionally with corner colors.
    fn add_patch(
        &mut self,
        controls: &[DVec3; 16],
        bbox: BBox3d,
        colors: Option<&[Rgba; 4]>,
    ) -> Result<()>;

    /// Bilinear (flat quad) patch.
    fn add_straight_patch(
        &mut self,
        controls: &[DVec3; 4],
        bbox: BBox3d,
        colors: Option<&[Rgba; 4]>,
    ) -> Result<()>;

    /// Cubic Bezier triangle (10 controls).
    fn add_bezier_triangle(
        &mut self,
        controls: &[DVec3; 10],
        bbox: BBox3d,
        colors: Option<&[Rgba; 3]>,
    ) -> Result<()>;

    /// Flat triangle.
    fn add_straight_bezier_triangle(
        &mut self,
        controls: &[DVec3; 3],
        bbox: BBox3d,
        colors: Option<&[Rgba; 3]>,
    ) -> Result<()>;

    fn add_sphere(&mut self, center: DVec3, radius: f64) -> Result<()>;

    fn add_sphere_half(
        &mut self,
        center: DVec3,
        radius: f64,
        polar: f64,
        azimuth: f64,
    ) -> Result<()>;

    fn add_cylinder(
        &mut self,
        center: DVec3,
        radius: f64,
        height: f64,
        polar: f64,
        azimuth: f64,
        core: bool,
    ) -> Result<()>;

    fn add_disk(&mut self, center: DVec3, radius: f64, polar: f64, azimuth: f64) -> Result<()>;

    fn add_tube(
        &mut self,
        controls: &[DVec3; 4],
        width: f64,
        bbox: BBox3d,
        core: bool,
    ) -> Result<()>;

    fn add_triangles(&mut self, mesh: &TriangleMesh<'_>) -> Result<()>;

    /// Cubic Bezier segment.
    fn add_curve(&mut self, z0: DVec3, c0: DVec3, c1: DVec3, z1: DVec3, bbox: BBox3d) -> Result<()>;

    /// Straight segment.
    fn add_line(&mut self, z0: DVec3, z1: DVec3, bbox: BBox3d) -> Result<()>;

    fn add_pixel(&mut self, z0: DVec3, width: f64, bbox: BBox3d) -> Result<()>;
}
