//! Composite geometry encoding built on [`XdrStream`] scalars.

use super::stream::XdrStream;
use crate::util::{to_u32, BBox3d, DVec3, IndexTriple, Result, Rgba};
use crate::v3d::format::V3dType;

/// Center and material indices stamped into a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexStamp {
    pub center_index: u32,
    pub material_index: u32,
}

#[inline]
pub(crate) fn write_tag(out: &mut XdrStream, tag: V3dType) -> Result<()> {
    out.write_u32(tag.code())
}

pub(crate) fn write_triples(out: &mut XdrStream, triples: &[DVec3]) -> Result<()> {
    for t in triples {
        out.write_triple(*t)?;
    }
    Ok(())
}

pub(crate) fn write_colors(out: &mut XdrStream, colors: &[Rgba]) -> Result<()> {
    for c in colors {
        out.write_vec4(*c)?;
    }
    Ok(())
}

pub(crate) fn write_indices(out: &mut XdrStream, v: &IndexTriple) -> Result<()> {
    out.write_u32(v[0])?;
    out.write_u32(v[1])?;
    out.write_u32(v[2])
}

/// Write `len` as a u32 count prefix.
pub(crate) fn write_count(out: &mut XdrStream, what: &'static str, len: usize) -> Result<()> {
    out.write_u32(to_u32(what, len)?)
}

pub(crate) fn write_bbox(out: &mut XdrStream, bbox: &BBox3d) -> Result<()> {
    out.write_triple(bbox.min)?;
    out.write_triple(bbox.max)
}

pub(crate) fn write_center_index_mat(out: &mut XdrStream, stamp: IndexStamp) -> Result<()> {
    out.write_u32(stamp.center_index)?;
    out.write_u32(stamp.material_index)
}

/// Centers record: tag, count, then the triples when there are any.
pub(crate) fn write_centers(out: &mut XdrStream, centers: &[DVec3]) -> Result<()> {
    write_tag(out, V3dType::Centers)?;
    write_count(out, "centers", centers.len())?;
    if !centers.is_empty() {
        write_triples(out, centers)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centers_empty() -> Result<()> {
        let mut s = XdrStream::memory();
        write_centers(&mut s, &[])?;
        let bytes = s.bytes().unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..4], &V3dType::Centers.code().to_be_bytes());
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_centers_with_points() -> Result<()> {
        let mut s = XdrStream::memory();
        write_centers(&mut s, &[DVec3::ZERO, DVec3::X])?;
        let bytes = s.bytes().unwrap();
        assert_eq!(bytes.len(), 8 + 2 * 24);
        assert_eq!(&bytes[4..8], &2u32.to_be_bytes());
        assert_eq!(&bytes[32..40], &1.0f64.to_be_bytes());
        Ok(())
    }

    #[test]
    fn test_stamp_and_indices() -> Result<()> {
        let mut s = XdrStream::memory();
        write_center_index_mat(&mut s, IndexStamp { center_index: 7, material_index: 2 })?;
        write_indices(&mut s, &[3, 4, 5])?;
        let words: Vec<u32> = s
            .bytes()
            .unwrap()
            .chunks_exact(4)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(words, vec![7, 2, 3, 4, 5]);
        Ok(())
    }
}
