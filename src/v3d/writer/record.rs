//! V3D records.
//!
//! One variant per record kind. The tag and the payload shape are both
//! decided in [`Record::encode`], so the two cannot drift apart.

use super::stream::XdrStream;
use super::write_util::{
    write_bbox, write_center_index_mat, write_colors, write_count, write_indices, write_tag,
    write_triples, IndexStamp,
};
use crate::util::{to_u32, BBox3d, DVec3, Error, IndexTriple, Material, Result, Rgba};
use crate::v3d::format::{TriangleIndexType, V3dType};

/// Indexed triangle mesh.
///
/// `normal_indices` runs parallel to `position_indices`. `color_indices` is
/// only read when `colors` is non-empty.
#[derive(Clone, Copy, Debug)]
pub struct TriangleMesh<'a> {
    pub positions: &'a [DVec3],
    pub normals: &'a [DVec3],
    pub colors: &'a [Rgba],
    pub position_indices: &'a [IndexTriple],
    pub normal_indices: &'a [IndexTriple],
    pub color_indices: &'a [IndexTriple],
    pub bbox: BBox3d,
}

impl<'a> TriangleMesh<'a> {
    /// Mesh without per-vertex colors.
    pub fn new(
        positions: &'a [DVec3],
        normals: &'a [DVec3],
        position_indices: &'a [IndexTriple],
        normal_indices: &'a [IndexTriple],
        bbox: BBox3d,
    ) -> Self {
        Self {
            positions,
            normals,
            colors: &[],
            position_indices,
            normal_indices,
            color_indices: &[],
            bbox,
        }
    }

    /// Attach vertex colors and their face indices.
    pub fn with_colors(mut self, colors: &'a [Rgba], color_indices: &'a [IndexTriple]) -> Self {
        self.colors = colors;
        self.color_indices = color_indices;
        self
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.position_indices.len()
    }

    #[inline]
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Sub-tag for face `i`: normal and color triples are only kept when
    /// they differ from the position triple.
    pub fn index_type(&self, i: usize) -> TriangleIndexType {
        let pi = &self.position_indices[i];
        let keep_ni = self.normal_indices[i] != *pi;
        let keep_ci = self.has_colors() && self.color_indices[i] != *pi;
        TriangleIndexType::select(keep_ni, keep_ci)
    }

    /// Check array shapes and index ranges before anything is written.
    pub fn validate(&self) -> Result<()> {
        let faces = self.num_faces();
        if self.normal_indices.len() != faces {
            return Err(Error::shape("normal indices", faces, self.normal_indices.len()));
        }
        if self.has_colors() && self.color_indices.len() != faces {
            return Err(Error::shape("color indices", faces, self.color_indices.len()));
        }
        to_u32("positions", self.positions.len())?;
        to_u32("normals", self.normals.len())?;
        to_u32("colors", self.colors.len())?;
        to_u32("triangles", faces)?;

        for i in 0..faces {
            let kind = self.index_type(i);
            check_range("position indices", &self.position_indices[i], self.positions.len())?;
            if kind.has_normals() {
                check_range("normal indices", &self.normal_indices[i], self.normals.len())?;
            }
            if kind.has_colors() {
                check_range("color indices", &self.color_indices[i], self.colors.len())?;
            }
        }
        Ok(())
    }

    fn encode(&self, out: &mut XdrStream, stamp: IndexStamp) -> Result<()> {
        write_count(out, "positions", self.positions.len())?;
        write_triples(out, self.positions)?;
        write_count(out, "normals", self.normals.len())?;
        write_triples(out, self.normals)?;

        if self.has_colors() {
            write_count(out, "colors", self.colors.len())?;
            write_colors(out, self.colors)?;
        } else {
            out.write_u32(0)?;
        }

        write_count(out, "triangles", self.num_faces())?;
        for i in 0..self.num_faces() {
            let kind = self.index_type(i);
            out.write_u32(kind.code())?;
            write_indices(out, &self.position_indices[i])?;
            if kind.has_normals() {
                write_indices(out, &self.normal_indices[i])?;
            }
            if kind.has_colors() {
                write_indices(out, &self.color_indices[i])?;
            }
        }

        out.write_u32(stamp.material_index)?;
        write_bbox(out, &self.bbox)
    }
}

fn check_range(what: &'static str, v: &IndexTriple, len: usize) -> Result<()> {
    match v.iter().find(|&&i| i as usize >= len) {
        Some(&index) => Err(Error::IndexOutOfRange { what, index, len }),
        None => Ok(()),
    }
}

/// A single V3D record.
#[derive(Clone, Copy, Debug)]
pub enum Record<'a> {
    Material(&'a Material),
    BezierPatch {
        controls: &'a [DVec3; 16],
        colors: Option<&'a [Rgba; 4]>,
        bbox: BBox3d,
    },
    StraightPatch {
        controls: &'a [DVec3; 4],
        colors: Option<&'a [Rgba; 4]>,
        bbox: BBox3d,
    },
    BezierTriangle {
        controls: &'a [DVec3; 10],
        colors: Option<&'a [Rgba; 3]>,
        bbox: BBox3d,
    },
    StraightTriangle {
        controls: &'a [DVec3; 3],
        colors: Option<&'a [Rgba; 3]>,
        bbox: BBox3d,
    },
    HalfSphere {
        center: DVec3,
        radius: f64,
        polar: f64,
        azimuth: f64,
    },
    Sphere {
        center: DVec3,
        radius: f64,
    },
    Cylinder {
        center: DVec3,
        radius: f64,
        height: f64,
        polar: f64,
        azimuth: f64,
        core: bool,
    },
    Disk {
        center: DVec3,
        radius: f64,
        polar: f64,
        azimuth: f64,
    },
    Tube {
        controls: [DVec3; 4],
        width: f64,
        bbox: BBox3d,
        core: bool,
    },
    /// Cubic Bezier segment `z0, c0, c1, z1`.
    Curve {
        controls: [DVec3; 4],
        bbox: BBox3d,
    },
    Line {
        z0: DVec3,
        z1: DVec3,
        bbox: BBox3d,
    },
    Pixel {
        z0: DVec3,
        width: f64,
        bbox: BBox3d,
    },
    Triangles(TriangleMesh<'a>),
}

impl Record<'_> {
    /// Tag this record is written with.
    pub fn tag(&self) -> V3dType {
        match self {
            Record::Material(_) => V3dType::Material,
            Record::BezierPatch { colors, .. } => {
                pick(colors.is_some(), V3dType::BezierPatch, V3dType::BezierPatchColor)
            }
            Record::StraightPatch { colors, .. } => {
                pick(colors.is_some(), V3dType::Quad, V3dType::QuadColor)
            }
            Record::BezierTriangle { colors, .. } => pick(
                colors.is_some(),
                V3dType::BezierTriangle,
                V3dType::BezierTriangleColor,
            ),
            Record::StraightTriangle { colors, .. } => {
                pick(colors.is_some(), V3dType::Triangle, V3dType::TriangleColor)
            }
            Record::HalfSphere { .. } => V3dType::HalfSphere,
            Record::Sphere { .. } => V3dType::Sphere,
            Record::Cylinder { .. } => V3dType::Cylinder,
            Record::Disk { .. } => V3dType::Disk,
            Record::Tube { .. } => V3dType::Tube,
            Record::Curve { .. } => V3dType::Curve,
            Record::Line { .. } => V3dType::Line,
            Record::Pixel { .. } => V3dType::Pixel,
            Record::Triangles(_) => V3dType::Triangles,
        }
    }

    /// Reject malformed input. Only meshes carry runtime-sized data.
    pub fn validate(&self) -> Result<()> {
        match self {
            Record::Triangles(mesh) => mesh.validate(),
            _ => Ok(()),
        }
    }

    /// Write tag and body.
    pub fn encode(&self, out: &mut XdrStream, stamp: IndexStamp) -> Result<()> {
        write_tag(out, self.tag())?;
        match self {
            Record::Material(mat) => {
                for v in mat.components() {
                    out.write_vec4(v)?;
                }
                Ok(())
            }
            Record::BezierPatch { controls, colors, bbox } => {
                encode_surface(out, *controls, colors.map(|c| &c[..]), bbox, stamp)
            }
            Record::StraightPatch { controls, colors, bbox } => {
                encode_surface(out, *controls, colors.map(|c| &c[..]), bbox, stamp)
            }
            Record::BezierTriangle { controls, colors, bbox } => {
                encode_surface(out, *controls, colors.map(|c| &c[..]), bbox, stamp)
            }
            Record::StraightTriangle { controls, colors, bbox } => {
                encode_surface(out, *controls, colors.map(|c| &c[..]), bbox, stamp)
            }
            Record::HalfSphere { center, radius, polar, azimuth } => {
                out.write_triple(*center)?;
                out.write_f64(*radius)?;
                write_center_index_mat(out, stamp)?;
                out.write_f64(*polar)?;
                out.write_f64(*azimuth)
            }
            Record::Sphere { center, radius } => {
                out.write_triple(*center)?;
                out.write_f64(*radius)?;
                write_center_index_mat(out, stamp)
            }
            Record::Cylinder { center, radius, height, polar, azimuth, core } => {
                out.write_triple(*center)?;
                out.write_f64(*radius)?;
                out.write_f64(*height)?;
                write_center_index_mat(out, stamp)?;
                out.write_f64(*polar)?;
                out.write_f64(*azimuth)?;
                out.write_bool(*core)
            }
            Record::Disk { center, radius, polar, azimuth } => {
                out.write_triple(*center)?;
                out.write_f64(*radius)?;
                write_center_index_mat(out, stamp)?;
                out.write_f64(*polar)?;
                out.write_f64(*azimuth)
            }
            Record::Tube { controls, width, bbox, core } => {
                write_triples(out, controls)?;
                out.write_f64(*width)?;
                write_center_index_mat(out, stamp)?;
                write_bbox(out, bbox)?;
                out.write_bool(*core)
            }
            Record::Curve { controls, bbox } => {
                write_triples(out, controls)?;
                write_center_index_mat(out, stamp)?;
                write_bbox(out, bbox)
            }
            Record::Line { z0, z1, bbox } => {
                out.write_triple(*z0)?;
                out.write_triple(*z1)?;
                write_center_index_mat(out, stamp)?;
                write_bbox(out, bbox)
            }
            Record::Pixel { z0, width, bbox } => {
                out.write_triple(*z0)?;
                out.write_f64(*width)?;
                out.write_u32(stamp.material_index)?;
                write_bbox(out, bbox)
            }
            Record::Triangles(mesh) => mesh.encode(out, stamp),
        }
    }
}

#[inline]
fn pick(colored: bool, plain: V3dType, with_color: V3dType) -> V3dType {
    if colored {
        with_color
    } else {
        plain
    }
}

/// Patch and triangle body: controls, stamp, optional colors, bbox.
fn encode_surface(
    out: &mut XdrStream,
    controls: &[DVec3],
    colors: Option<&[Rgba]>,
    bbox: &BBox3d,
    stamp: IndexStamp,
) -> Result<()> {
    write_triples(out, controls)?;
    write_center_index_mat(out, stamp)?;
    if let Some(colors) = colors {
        write_colors(out, colors)?;
    }
    write_bbox(out, bbox)
}
