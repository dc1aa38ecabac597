//! V3D format constants and record tags.
//!
//! Tag values match the reader shipped with the V3D web renderer; they are
//! an external contract and must not be renumbered.

/// Format version written as the first scalar of every stream.
pub const V3D_VERSION: u32 = 1;

/// Encoded size of a `u32` scalar.
pub const UINT_SIZE: usize = 4;
/// Encoded size of a `bool` scalar (XDR booleans are 32-bit).
pub const BOOL_SIZE: usize = 4;
/// Encoded size of an `f32` scalar.
pub const FLOAT_SIZE: usize = 4;
/// Encoded size of an `f64` scalar.
pub const DOUBLE_SIZE: usize = 8;
/// Encoded size of a triple (3 x f64).
pub const TRIPLE_SIZE: usize = 3 * DOUBLE_SIZE;
/// Encoded size of an RGBA color or material vector (4 x f32).
pub const VEC4_SIZE: usize = 4 * FLOAT_SIZE;
/// Encoded size of an index triple (3 x u32).
pub const INDICES_SIZE: usize = 3 * UINT_SIZE;
/// Encoded size of the center-index + material-index pair.
pub const CENTER_INDEX_MAT_SIZE: usize = 2 * UINT_SIZE;
/// Encoded size of a bounding box (min, max).
pub const BBOX_SIZE: usize = 2 * TRIPLE_SIZE;

/// Record type tag, written as a `u32` at the start of every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum V3dType {
    Material = 1,
    Centers = 4,
    Header = 5,

    Line = 64,
    Triangle = 65,
    Quad = 66,

    Curve = 128,
    BezierTriangle = 129,
    BezierPatch = 130,

    TriangleColor = 193,
    QuadColor = 194,

    BezierTriangleColor = 257,
    BezierPatchColor = 258,

    Triangles = 512,

    Disk = 1024,
    Cylinder = 1025,
    Tube = 1026,
    Sphere = 1027,
    HalfSphere = 1028,

    Pixel = 4096,
}

impl V3dType {
    /// Every tag this encoder emits.
    pub const ALL: [V3dType; 20] = [
        V3dType::Material,
        V3dType::Centers,
        V3dType::Header,
        V3dType::Line,
        V3dType::Triangle,
        V3dType::Quad,
        V3dType::Curve,
        V3dType::BezierTriangle,
        V3dType::BezierPatch,
        V3dType::TriangleColor,
        V3dType::QuadColor,
        V3dType::BezierTriangleColor,
        V3dType::BezierPatchColor,
        V3dType::Triangles,
        V3dType::Disk,
        V3dType::Cylinder,
        V3dType::Tube,
        V3dType::Sphere,
        V3dType::HalfSphere,
        V3dType::Pixel,
    ];

    /// Wire value of this tag.
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Look up a tag by its wire value.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }

    /// Returns the tag name as used by the renderer.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Centers => "centers",
            Self::Header => "header",
            Self::Line => "line",
            Self::Triangle => "triangle",
            Self::Quad => "quad",
            Self::Curve => "curve",
            Self::BezierTriangle => "bezierTriangle",
            Self::BezierPatch => "bezierPatch",
            Self::TriangleColor => "triangleColor",
            Self::QuadColor => "quadColor",
            Self::BezierTriangleColor => "bezierTriangleColor",
            Self::BezierPatchColor => "bezierPatchColor",
            Self::Triangles => "triangles",
            Self::Disk => "disk",
            Self::Cylinder => "cylinder",
            Self::Tube => "tube",
            Self::Sphere => "sphere",
            Self::HalfSphere => "halfSphere",
            Self::Pixel => "pixel",
        }
    }

    /// Number of bytes following the tag for fixed-shape records.
    ///
    /// Returns `None` for `Triangles` and `Centers`, whose bodies carry
    /// their own count prefixes.
    pub const fn fixed_body_len(self) -> Option<usize> {
        const T: usize = TRIPLE_SIZE;
        const CIM: usize = CENTER_INDEX_MAT_SIZE;
        const D: usize = DOUBLE_SIZE;
        let len = match self {
            Self::Header => 0,
            Self::Material => 4 * VEC4_SIZE,
            Self::BezierPatch => 16 * T + CIM + BBOX_SIZE,
            Self::BezierPatchColor => 16 * T + CIM + 4 * VEC4_SIZE + BBOX_SIZE,
            Self::Quad => 4 * T + CIM + BBOX_SIZE,
            Self::QuadColor => 4 * T + CIM + 4 * VEC4_SIZE + BBOX_SIZE,
            Self::BezierTriangle => 10 * T + CIM + BBOX_SIZE,
            Self::BezierTriangleColor => 10 * T + CIM + 3 * VEC4_SIZE + BBOX_SIZE,
            Self::Triangle => 3 * T + CIM + BBOX_SIZE,
            Self::TriangleColor => 3 * T + CIM + 3 * VEC4_SIZE + BBOX_SIZE,
            Self::HalfSphere => T + D + CIM + 2 * D,
            Self::Sphere => T + D + CIM,
            Self::Cylinder => T + 2 * D + CIM + 2 * D + BOOL_SIZE,
            Self::Disk => T + D + CIM + 2 * D,
            Self::Tube => 4 * T + D + CIM + BBOX_SIZE + BOOL_SIZE,
            Self::Curve => 4 * T + CIM + BBOX_SIZE,
            Self::Line => 2 * T + CIM + BBOX_SIZE,
            Self::Pixel => T + D + UINT_SIZE + BBOX_SIZE,
            Self::Triangles | Self::Centers => return None,
        };
        Some(len)
    }
}

/// Per-face sub-tag inside a `Triangles` record, selecting which index
/// triples follow the position triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TriangleIndexType {
    Pos = 0,
    PosNorm = 1,
    PosColor = 2,
    PosNormColor = 3,
}

impl TriangleIndexType {
    /// Pick the sub-tag from which optional triples are kept.
    #[inline]
    pub const fn select(keep_normals: bool, keep_colors: bool) -> Self {
        match (keep_normals, keep_colors) {
            (true, true) => Self::PosNormColor,
            (true, false) => Self::PosNorm,
            (false, true) => Self::PosColor,
            (false, false) => Self::Pos,
        }
    }

    /// Wire value of this sub-tag.
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Pos),
            1 => Some(Self::PosNorm),
            2 => Some(Self::PosColor),
            3 => Some(Self::PosNormColor),
            _ => None,
        }
    }

    #[inline]
    pub const fn has_normals(self) -> bool {
        matches!(self, Self::PosNorm | Self::PosNormColor)
    }

    #[inline]
    pub const fn has_colors(self) -> bool {
        matches!(self, Self::PosColor | Self::PosNormColor)
    }

    /// Number of index triples following the sub-tag.
    #[inline]
    pub const fn triple_count(self) -> usize {
        1 + self.has_normals() as usize + self.has_colors() as usize
    }
}
