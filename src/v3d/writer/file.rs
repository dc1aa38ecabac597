//! V3D file encoder.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, trace, warn};

use super::exporter::SceneExporter;
use super::options::EncoderOptions;
use super::record::{Record, TriangleMesh};
use super::scene::SharedScene;
use super::stream::XdrStream;
use super::write_util::{write_centers, write_tag, IndexStamp};
use crate::util::{to_u32, BBox3d, DVec3, Error, Material, Result, Rgba};
use crate::v3d::format::{V3dType, V3D_VERSION};

/// Counters kept while encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncoderStats {
    /// Primitive and material records added.
    pub records: u64,
    /// Uncompressed bytes written, header and centers included.
    pub bytes_written: u64,
    /// Records per tag.
    pub per_tag: BTreeMap<V3dType, u64>,
}

impl EncoderStats {
    pub fn count(&self, tag: V3dType) -> u64 {
        self.per_tag.get(&tag).copied().unwrap_or(0)
    }
}

/// V3D scene encoder.
///
/// Writes the version and header on construction, one record per add call,
/// and the centers table on the first [`close`](Self::close). Dropping an
/// open encoder closes it.
///
/// A failed write aborts the export: later adds and closes return
/// [`Error::Aborted`].
pub struct V3dFile {
    name: String,
    stream: XdrStream,
    scene: SharedScene,
    finished: bool,
    aborted: bool,
    stats: EncoderStats,
}

impl V3dFile {
    /// Create a V3D file with default options and a fresh scene state.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_with_options(path, &EncoderOptions::default(), SharedScene::new())
    }

    /// Create a V3D file reading centers and indices from `scene`.
    pub fn create_with_options(
        path: impl AsRef<Path>,
        options: &EncoderOptions,
        scene: SharedScene,
    ) -> Result<Self> {
        let name = path.as_ref().to_string_lossy().to_string();
        let stream = XdrStream::create(&path, options)?;
        debug!(
            "Opened V3D file {} (version {}, compression {})",
            name,
            options.get_version(),
            options.get_compression_hint()
        );
        Self::start(name, stream, options.get_version(), scene)
    }

    /// Encoder writing to memory; see [`bytes`](Self::bytes).
    pub fn in_memory(scene: SharedScene) -> Result<Self> {
        Self::start(String::new(), XdrStream::memory(), V3D_VERSION, scene)
    }

    fn start(name: String, stream: XdrStream, version: u32, scene: SharedScene) -> Result<Self> {
        let mut file = Self {
            name,
            stream,
            scene,
            finished: false,
            aborted: false,
            stats: EncoderStats::default(),
        };
        file.stream.write_u32(version)?;
        file.add_header()?;
        Ok(file)
    }

    fn add_header(&mut self) -> Result<()> {
        write_tag(&mut self.stream, V3dType::Header)
    }

    /// Destination path (empty for in-memory encoders).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to the scene state this encoder reads.
    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True once a write has failed.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn stats(&self) -> &EncoderStats {
        &self.stats
    }

    /// Bytes written so far, for in-memory encoders.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.stream.bytes()
    }

    /// Snapshot of the indices stamped into the next record.
    fn stamp(&self) -> Result<IndexStamp> {
        let state = self.scene.read();
        Ok(IndexStamp {
            center_index: to_u32("center index", state.center_index)?,
            material_index: state.material_index,
        })
    }

    /// Validate and write one record.
    pub fn add(&mut self, record: Record<'_>) -> Result<()> {
        if self.aborted {
            return Err(Error::Aborted);
        }
        if self.finished {
            return Err(Error::StreamClosed);
        }
        record.validate()?;
        let stamp = self.stamp()?;

        let start = self.stream.pos();
        if let Err(e) = record.encode(&mut self.stream, stamp) {
            self.aborted = true;
            return Err(e);
        }

        let tag = record.tag();
        self.stats.records += 1;
        *self.stats.per_tag.entry(tag).or_default() += 1;
        self.stats.bytes_written = self.stream.pos();
        trace!("Wrote {} record ({} bytes)", tag.name(), self.stream.pos() - start);
        Ok(())
    }

    fn finish(&mut self, centers: &[DVec3]) -> Result<()> {
        write_centers(&mut self.stream, centers)?;
        self.stats.bytes_written = self.stream.pos();
        self.stream.close()
    }

    /// Flush the centers table and close the stream.
    ///
    /// Later calls write nothing; they return `Ok` after a clean close and
    /// [`Error::Aborted`] after a failed one.
    pub fn close(&mut self) -> Result<()> {
        if self.finished {
            return if self.aborted { Err(Error::Aborted) } else { Ok(()) };
        }
        self.finished = true;

        if self.aborted {
            // Release the destination; the stream is already torn.
            if let Err(e) = self.stream.close() {
                warn!("Closing aborted V3D file {}: {}", self.name, e);
            }
            return Err(Error::Aborted);
        }

        let centers = self.scene.read().centers.clone();
        if let Err(e) = self.finish(&centers) {
            self.aborted = true;
            return Err(e);
        }

        debug!(
            "Closed V3D file {}: {} records, {} centers, {} bytes",
            self.name,
            self.stats.records,
            centers.len(),
            self.stats.bytes_written
        );
        Ok(())
    }
}

impl SceneExporter for V3dFile {
    fn add_material(&mut self, mat: &Material) -> Result<()> {
        self.add(Record::Material(mat))
    }

    fn add_patch(
        &mut self,
        controls: &[DVec3; 16],
        bbox: BBox3d,
        colors: Option<&[Rgba; 4]>,
    ) -> Result<()> {
        self.add(Record::BezierPatch { controls, colors, bbox })
    }

    fn add_straight_patch(
        &mut self,
        controls: &[DVec3; 4],
        bbox: BBox3d,
        colors: Option<&[Rgba; 4]>,
    ) -> Result<()> {
        self.add(Record::StraightPatch { controls, colors, bbox })
    }

    fn add_bezier_triangle(
        &mut self,
        controls: &[DVec3; 10],
        bbox: BBox3d,
        colors: Option<&[Rgba; 3]>,
    ) -> Result<()> {
        self.add(Record::BezierTriangle { controls, colors, bbox })
    }

    fn add_straight_bezier_triangle(
        &mut self,
        controls: &[DVec3; 3],
        bbox: BBox3d,
        colors: Option<&[Rgba; 3]>,
    ) -> Result<()> {
        self.add(Record::StraightTriangle { controls, colors, bbox })
    }

    fn add_sphere(&mut self, center: DVec3, radius: f64) -> Result<()> {
        self.add(Record::Sphere { center, radius })
    }

    fn add_sphere_half(
        &mut self,
        center: DVec3,
        radius: f64,
        polar: f64,
        azimuth: f64,
    ) -> Result<()> {
        self.add(Record::HalfSphere { center, radius, polar, azimuth })
    }

    fn add_cylinder(
        &mut self,
        center: DVec3,
        radius: f64,
        height: f64,
        polar: f64,
        azimuth: f64,
        core: bool,
    ) -> Result<()> {
        self.add(Record::Cylinder { center, radius, height, polar, azimuth, core })
    }

    fn add_disk(&mut self, center: DVec3, radius: f64, polar: f64, azimuth: f64) -> Result<()> {
        self.add(Record::Disk { center, radius, polar, azimuth })
    }

    fn add_tube(
        &mut self,
        controls: &[DVec3; 4],
        width: f64,
        bbox: BBox3d,
        core: bool,
    ) -> Result<()> {
        self.add(Record::Tube { controls: *controls, width, bbox, core })
    }

    fn add_triangles(&mut self, mesh: &TriangleMesh<'_>) -> Result<()> {
        self.add(Record::Triangles(*mesh))
    }

    fn add_curve(
        &mut self,
        z0: DVec3,
        c0: DVec3,
        c1: DVec3,
        z1: DVec3,
        bbox: BBox3d,
    ) -> Result<()> {
        self.add(Record::Curve { controls: [z0, c0, c1, z1], bbox })
    }

    fn add_line(&mut self, z0: DVec3, z1: DVec3, bbox: BBox3d) -> Result<()> {
        self.add(Record::Line { z0, z1, bbox })
    }

    fn add_pixel(&mut self, z0: DVec3, width: f64, bbox: BBox3d) -> Result<()> {
        self.add(Record::Pixel { z0, width, bbox })
    }
}

impl Drop for V3dFile {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.close() {
            warn!("Failed to close V3D file {}: {}", self.name, e);
        }
    }
}
