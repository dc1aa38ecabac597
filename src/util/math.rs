//! Math type re-exports and V3D-specific value types.
//!
//! Geometry travels in double precision (`DVec3`), colors and material
//! parameters in single precision (`Vec4`), matching the wire format.

pub use glam::{DVec3, Vec4};

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// RGBA color, one `f32` per channel.
pub type Rgba = Vec4;

/// Index triple of one triangle face.
pub type IndexTriple = [u32; 3];

/// 3D bounding box with double precision.
///
/// Written verbatim as `min` then `max`; no ordering between the two is
/// enforced.
#[derive(Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct BBox3d {
    pub min: DVec3,
    pub max: DVec3,
}

impl BBox3d {
    #[inline]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }
}

impl fmt::Debug for BBox3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox3d({:?} - {:?})", self.min, self.max)
    }
}

/// Surface material, four single-precision 4-vectors.
///
/// `parameters` packs shininess, metallic, fresnel and opacity terms as the
/// renderer defines them.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Material {
    pub diffuse: Vec4,
    pub emissive: Vec4,
    pub specular: Vec4,
    pub parameters: Vec4,
}

impl Material {
    pub const fn new(diffuse: Vec4, emissive: Vec4, specular: Vec4, parameters: Vec4) -> Self {
        Self { diffuse, emissive, specular, parameters }
    }

    /// Components in wire order.
    #[inline]
    pub fn components(&self) -> [Vec4; 4] {
        bytemuck::cast(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox3d_keeps_corners_verbatim() {
        let b = BBox3d::new(DVec3::ONE, DVec3::new(-1.0, 0.0, 2.0));
        assert_eq!(b.min, DVec3::ONE);
        assert_eq!(b.max.x, -1.0);
        assert!(format!("{b:?}").starts_with("BBox3d("));
    }

    #[test]
    fn test_material_components_order() {
        let m = Material::new(
            Vec4::splat(1.0),
            Vec4::splat(2.0),
            Vec4::splat(3.0),
            Vec4::new(4.0, 5.0, 6.0, 7.0),
        );
        let c = m.components();
        assert_eq!(c[0], m.diffuse);
        assert_eq!(c[1], m.emissive);
        assert_eq!(c[2], m.specular);
        assert_eq!(c[3], m.parameters);
    }

    #[test]
    fn test_pod_sizes() {
        assert_eq!(std::mem::size_of::<BBox3d>(), 48); // 2 * DVec3 = 2 * 24
        assert_eq!(std::mem::size_of::<Material>(), 64); // 4 * Vec4 = 4 * 16
    }
}
