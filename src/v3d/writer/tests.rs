use super::*;
use crate::util::{BBox3d, DVec3, Error, Material, Result, Vec4};
use crate::v3d::format::{TriangleIndexType, V3dType, V3D_VERSION};

/// Big-endian byte cursor over encoder output.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn u32(&mut self) -> u32 {
        let b = &self.bytes[self.pos..self.pos + 4];
        self.pos += 4;
        u32::from_be_bytes([b[0], b[1], b[2], b[3]])
    }

    fn f64(&mut self) -> f64 {
        let mut b = [0u8; 8];
        b.copy_from_slice(&self.bytes[self.pos..self.pos + 8]);
        self.pos += 8;
        f64::from_be_bytes(b)
    }

    fn triple(&mut self) -> DVec3 {
        DVec3::new(self.f64(), self.f64(), self.f64())
    }

    fn indices(&mut self) -> [u32; 3] {
        [self.u32(), self.u32(), self.u32()]
    }

    fn tag(&mut self) -> V3dType {
        let code = self.u32();
        V3dType::from_code(code).unwrap_or_else(|| panic!("unknown tag {code}"))
    }

    fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }
}

fn unit_bbox() -> BBox3d {
    BBox3d::new(DVec3::ZERO, DVec3::ONE)
}

fn closed_bytes(mut file: V3dFile) -> Result<Vec<u8>> {
    file.close()?;
    Ok(file.bytes().unwrap().to_vec())
}

#[test]
fn test_empty_file() -> Result<()> {
    let file = V3dFile::in_memory(SharedScene::new())?;
    let bytes = closed_bytes(file)?;

    let mut c = Cursor::new(&bytes);
    assert_eq!(c.u32(), V3D_VERSION);
    assert_eq!(c.tag(), V3dType::Header);
    assert_eq!(c.tag(), V3dType::Centers);
    assert_eq!(c.u32(), 0);
    assert!(c.at_end());
    Ok(())
}

#[test]
fn test_sphere_then_line_scenario() -> Result<()> {
    let scene = SharedScene::new();
    scene.add_center(DVec3::new(1.0, 2.0, 3.0));
    scene.add_center(DVec3::new(4.0, 5.0, 6.0));
    scene.set_material_index(0);

    let mut file = V3dFile::in_memory(scene.clone())?;
    file.add_sphere(DVec3::ZERO, 1.0)?;
    file.add_line(DVec3::ZERO, DVec3::ONE, unit_bbox())?;
    file.close()?;
    let once = file.bytes().unwrap().to_vec();
    file.close()?;
    assert_eq!(file.bytes().unwrap(), &once[..]);

    let mut c = Cursor::new(&once);
    assert_eq!(c.u32(), V3D_VERSION);
    assert_eq!(c.tag(), V3dType::Header);

    assert_eq!(c.tag(), V3dType::Sphere);
    assert_eq!(c.triple(), DVec3::ZERO);
    assert_eq!(c.f64(), 1.0);
    assert_eq!((c.u32(), c.u32()), (0, 0));

    assert_eq!(c.tag(), V3dType::Line);
    assert_eq!(c.triple(), DVec3::ZERO);
    assert_eq!(c.triple(), DVec3::ONE);
    assert_eq!((c.u32(), c.u32()), (0, 0));
    assert_eq!(c.triple(), DVec3::ZERO);
    assert_eq!(c.triple(), DVec3::ONE);

    assert_eq!(c.tag(), V3dType::Centers);
    assert_eq!(c.u32(), 2);
    assert_eq!(c.triple(), DVec3::new(1.0, 2.0, 3.0));
    assert_eq!(c.triple(), DVec3::new(4.0, 5.0, 6.0));
    assert!(c.at_end());
    Ok(())
}

#[test]
fn test_add_after_close_fails() -> Result<()> {
    let mut file = V3dFile::in_memory(SharedScene::new())?;
    file.close()?;
    let len = file.bytes().unwrap().len();

    assert!(matches!(file.add_sphere(DVec3::ZERO, 1.0), Err(Error::StreamClosed)));
    assert!(matches!(
        file.add_pixel(DVec3::ZERO, 1.0, unit_bbox()),
        Err(Error::StreamClosed)
    ));
    assert_eq!(file.bytes().unwrap().len(), len);
    assert!(file.is_finished());
    Ok(())
}

#[test]
fn test_stamp_reads_current_scene_state() -> Result<()> {
    let scene = SharedScene::new();
    let mut file = V3dFile::in_memory(scene.clone())?;

    scene.set_center_index(3);
    scene.set_material_index(7);
    file.add_sphere(DVec3::ZERO, 1.0)?;

    scene.set_center_index(0);
    scene.set_material_index(2);
    file.add_disk(DVec3::ZERO, 1.0, 0.5, 0.25)?;

    let bytes = closed_bytes(file)?;
    let mut c = Cursor::new(&bytes);
    c.u32();
    c.tag();

    assert_eq!(c.tag(), V3dType::Sphere);
    c.triple();
    c.f64();
    assert_eq!((c.u32(), c.u32()), (3, 7));

    assert_eq!(c.tag(), V3dType::Disk);
    c.triple();
    c.f64();
    assert_eq!((c.u32(), c.u32()), (0, 2));
    assert_eq!(c.f64(), 0.5);
    assert_eq!(c.f64(), 0.25);

    // Encoder never mutates the shared state.
    assert_eq!(scene.material_index(), 2);
    assert!(scene.read().centers.is_empty());
    Ok(())
}

#[test]
fn test_colored_patch() -> Result<()> {
    let controls: [DVec3; 16] = std::array::from_fn(|i| DVec3::splat(i as f64));
    let colors = [
        Vec4::new(1.0, 0.0, 0.0, 1.0),
        Vec4::new(0.0, 1.0, 0.0, 1.0),
        Vec4::new(0.0, 0.0, 1.0, 1.0),
        Vec4::new(1.0, 1.0, 1.0, 0.5),
    ];

    let mut file = V3dFile::in_memory(SharedScene::new())?;
    file.add_patch(&controls, unit_bbox(), None)?;
    file.add_patch(&controls, unit_bbox(), Some(&colors))?;
    let stats = file.stats().clone();
    let bytes = closed_bytes(file)?;

    let plain = V3dType::BezierPatch.fixed_body_len().unwrap();
    let colored = V3dType::BezierPatchColor.fixed_body_len().unwrap();
    assert_eq!(colored - plain, 4 * 16);
    assert_eq!(bytes.len(), 8 + (4 + plain) + (4 + colored) + 8);

    let mut c = Cursor::new(&bytes);
    c.u32();
    c.tag();
    assert_eq!(c.tag(), V3dType::BezierPatch);
    c.pos += plain;
    assert_eq!(c.tag(), V3dType::BezierPatchColor);
    assert_eq!(c.triple(), DVec3::ZERO);
    c.pos += 15 * 24 + 8;
    assert_eq!(&bytes[c.pos..c.pos + 4], &1.0f32.to_be_bytes());
    assert_eq!(&bytes[c.pos + 60..c.pos + 64], &0.5f32.to_be_bytes());

    assert_eq!(stats.records, 2);
    assert_eq!(stats.count(V3dType::BezierPatch), 1);
    assert_eq!(stats.count(V3dType::BezierPatchColor), 1);
    Ok(())
}

#[test]
fn test_material_record() -> Result<()> {
    let mat = Material::new(
        Vec4::new(0.1, 0.2, 0.3, 1.0),
        Vec4::ZERO,
        Vec4::splat(0.5),
        Vec4::new(0.25, 0.0, 0.04, 1.0),
    );
    let mut file = V3dFile::in_memory(SharedScene::new())?;
    file.add_material(&mat)?;
    let bytes = closed_bytes(file)?;

    let mut c = Cursor::new(&bytes);
    c.u32();
    c.tag();
    assert_eq!(c.tag(), V3dType::Material);
    let body = &bytes[c.pos..c.pos + 64];
    let floats: Vec<f32> = body
        .chunks_exact(4)
        .map(|b| f32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    assert_eq!(&floats[0..4], &[0.1, 0.2, 0.3, 1.0]);
    assert_eq!(&floats[8..12], &[0.5; 4]);
    assert_eq!(&floats[12..16], &[0.25, 0.0, 0.04, 1.0]);
    Ok(())
}

/// Faces covering every (normals kept, colors kept) combination.
#[test]
fn test_triangle_index_dedup() -> Result<()> {
    let positions = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
    let normals = [DVec3::Z, DVec3::X, DVec3::Y, DVec3::ONE];
    let colors = [Vec4::ONE, Vec4::ZERO, Vec4::splat(0.5), Vec4::W];
    let pi = [[0, 1, 2], [1, 2, 3], [0, 2, 3], [0, 1, 3]];
    let ni = [[0, 1, 2], [3, 2, 1], [0, 2, 3], [0, 0, 0]];
    let ci = [[0, 1, 2], [1, 2, 3], [3, 2, 0], [1, 1, 1]];
    let expected = [
        TriangleIndexType::Pos,
        TriangleIndexType::PosNorm,
        TriangleIndexType::PosColor,
        TriangleIndexType::PosNormColor,
    ];

    let scene = SharedScene::new();
    scene.set_material_index(5);
    scene.set_center_index(9);
    let mesh = TriangleMesh::new(&positions, &normals, &pi, &ni, unit_bbox())
        .with_colors(&colors, &ci);
    for (i, kind) in expected.iter().enumerate() {
        assert_eq!(mesh.index_type(i), *kind);
    }

    let mut file = V3dFile::in_memory(scene)?;
    file.add_triangles(&mesh)?;
    let bytes = closed_bytes(file)?;

    let mut c = Cursor::new(&bytes);
    c.u32();
    c.tag();
    assert_eq!(c.tag(), V3dType::Triangles);
    assert_eq!(c.u32(), 4);
    for p in positions {
        assert_eq!(c.triple(), p);
    }
    assert_eq!(c.u32(), 4);
    c.pos += 4 * 24;
    assert_eq!(c.u32(), 4);
    c.pos += 4 * 16;
    assert_eq!(c.u32(), 4);

    for (i, kind) in expected.iter().enumerate() {
        let sub = TriangleIndexType::from_code(c.u32()).unwrap();
        assert_eq!(sub, *kind, "face {i}");
        assert_eq!(c.indices(), pi[i]);
        if sub.has_normals() {
            assert_eq!(c.indices(), ni[i]);
        }
        if sub.has_colors() {
            assert_eq!(c.indices(), ci[i]);
        }
    }

    // Material index only; no center index in mesh records.
    assert_eq!(c.u32(), 5);
    assert_eq!(c.triple(), DVec3::ZERO);
    assert_eq!(c.triple(), DVec3::ONE);
    assert_eq!(c.tag(), V3dType::Centers);
    Ok(())
}

#[test]
fn test_triangles_without_colors_ignore_color_indices() -> Result<()> {
    let positions = [DVec3::ZERO, DVec3::X, DVec3::Y];
    let pi = [[0, 1, 2]];
    let ci = [[2, 1, 0]];
    let mesh = TriangleMesh::new(&positions, &positions, &pi, &pi, unit_bbox())
        .with_colors(&[], &ci);
    assert_eq!(mesh.index_type(0), TriangleIndexType::Pos);

    let mut file = V3dFile::in_memory(SharedScene::new())?;
    file.add_triangles(&mesh)?;
    let bytes = closed_bytes(file)?;

    let mut c = Cursor::new(&bytes);
    c.u32();
    c.tag();
    assert_eq!(c.tag(), V3dType::Triangles);
    c.u32();
    c.pos += 3 * 24;
    c.u32();
    c.pos += 3 * 24;
    assert_eq!(c.u32(), 0, "color count");
    assert_eq!(c.u32(), 1);
    assert_eq!(c.u32(), TriangleIndexType::Pos.code());
    assert_eq!(c.indices(), [0, 1, 2]);
    assert_eq!(c.u32(), 0);
    Ok(())
}

#[test]
fn test_malformed_mesh_writes_nothing() -> Result<()> {
    let positions = [DVec3::ZERO, DVec3::X, DVec3::Y];
    let pi = [[0, 1, 2], [2, 1, 0]];
    let ni = [[0, 1, 2]];

    let mut file = V3dFile::in_memory(SharedScene::new())?;
    let before = file.bytes().unwrap().len();
    let mesh = TriangleMesh::new(&positions, &positions, &pi, &ni, unit_bbox());
    assert!(matches!(
        file.add_triangles(&mesh),
        Err(Error::ShapeMismatch { expected: 2, actual: 1, .. })
    ));
    assert_eq!(file.bytes().unwrap().len(), before);
    assert_eq!(file.stats().records, 0);
    Ok(())
}

#[test]
fn test_precision_is_inert() -> Result<()> {
    let mut a = V3dFile::in_memory(SharedScene::new())?;
    let mut b = V3dFile::in_memory(SharedScene::new())?;
    a.precision(3);
    a.add_sphere(DVec3::splat(1.0 / 3.0), 0.1)?;
    b.add_sphere(DVec3::splat(1.0 / 3.0), 0.1)?;
    assert_eq!(closed_bytes(a)?, closed_bytes(b)?);
    Ok(())
}

#[test]
fn test_center_index_overflow() -> Result<()> {
    let scene = SharedScene::new();
    let mut file = V3dFile::in_memory(scene.clone())?;
    scene.set_center_index(usize::MAX);
    #[cfg(target_pointer_width = "64")]
    assert!(matches!(
        file.add_sphere(DVec3::ZERO, 1.0),
        Err(Error::Overflow { what: "center index", .. })
    ));
    Ok(())
}
