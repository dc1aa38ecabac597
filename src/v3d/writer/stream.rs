//! XDR output stream.
//!
//! Every scalar is written big-endian; booleans occupy a full 32-bit word.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{BigEndian, WriteBytesExt};
use flate2::write::GzEncoder;
use flate2::Compression;

use super::options::{EncoderOptions, OpenMode};
use crate::util::{DVec3, Error, Result, Vec4};

enum Sink {
    File(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Memory(Vec<u8>),
}

impl Sink {
    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Sink::File(w) => w,
            Sink::Gzip(w) => w,
            Sink::Memory(w) => w,
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self {
            Sink::File(w) => w.flush()?,
            Sink::Gzip(w) => {
                w.try_finish()?;
                w.get_mut().flush()?;
            }
            Sink::Memory(_) => {}
        }
        Ok(())
    }
}

/// Sequential output stream for V3D data.
pub struct XdrStream {
    sink: Sink,
    pos: u64,
    closed: bool,
}

impl XdrStream {
    /// Open a file destination according to `options`.
    pub fn create(path: impl AsRef<Path>, options: &EncoderOptions) -> Result<Self> {
        options.validate()?;

        let mut open = OpenOptions::new();
        match options.get_open_mode() {
            OpenMode::Truncate => open.write(true).create(true).truncate(true),
            OpenMode::Append => open.append(true).create(true),
        };
        let file = open.open(path)?;
        let writer = BufWriter::with_capacity(options.get_buffer_capacity(), file);

        let sink = match options.gzip_level() {
            Some(level) => Sink::Gzip(GzEncoder::new(writer, Compression::new(level))),
            None => Sink::File(writer),
        };

        Ok(Self { sink, pos: 0, closed: false })
    }

    /// In-memory destination.
    pub fn memory() -> Self {
        Self {
            sink: Sink::Memory(Vec::new()),
            pos: 0,
            closed: false,
        }
    }

    /// Number of uncompressed bytes written so far.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Bytes written to an in-memory destination.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.sink {
            Sink::Memory(buf) => Some(buf),
            _ => None,
        }
    }

    fn open_writer(&mut self) -> Result<&mut dyn Write> {
        if self.closed {
            return Err(Error::StreamClosed);
        }
        Ok(self.sink.writer())
    }

    /// Write a u32 value.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.open_writer()?.write_u32::<BigEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    /// Write a bool as a 32-bit word (0 or 1).
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u32(value as u32)
    }

    /// Write an f32 value.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.open_writer()?.write_f32::<BigEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    /// Write an f64 value.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.open_writer()?.write_f64::<BigEndian>(value)?;
        self.pos += 8;
        Ok(())
    }

    /// Write a triple as three f64 values.
    pub fn write_triple(&mut self, v: DVec3) -> Result<()> {
        self.write_f64(v.x)?;
        self.write_f64(v.y)?;
        self.write_f64(v.z)
    }

    /// Write a 4-vector as four f32 values.
    pub fn write_vec4(&mut self, v: Vec4) -> Result<()> {
        self.write_f32(v.x)?;
        self.write_f32(v.y)?;
        self.write_f32(v.z)?;
        self.write_f32(v.w)
    }

    /// Flush and finish the destination. Further writes fail.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.sink.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_scalars() -> Result<()> {
        let mut s = XdrStream::memory();
        s.write_u32(0x0102_0304)?;
        s.write_bool(true)?;
        s.write_f32(1.0)?;
        s.write_f64(-2.0)?;

        let bytes = s.bytes().unwrap();
        assert_eq!(&bytes[0..4], &[1, 2, 3, 4]);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 1]);
        assert_eq!(&bytes[8..12], &1.0f32.to_be_bytes());
        assert_eq!(&bytes[12..20], &(-2.0f64).to_be_bytes());
        assert_eq!(s.pos(), 20);
        Ok(())
    }

    #[test]
    fn test_vectors() -> Result<()> {
        let mut s = XdrStream::memory();
        s.write_triple(DVec3::new(1.0, 2.0, 3.0))?;
        s.write_vec4(Vec4::new(0.25, 0.5, 0.75, 1.0))?;

        let bytes = s.bytes().unwrap();
        assert_eq!(bytes.len(), 24 + 16);
        assert_eq!(&bytes[16..24], &3.0f64.to_be_bytes());
        assert_eq!(&bytes[36..40], &1.0f32.to_be_bytes());
        Ok(())
    }

    #[test]
    fn test_write_after_close_fails() -> Result<()> {
        let mut s = XdrStream::memory();
        s.write_u32(1)?;
        s.close()?;
        s.close()?;

        assert!(s.is_closed());
        assert!(matches!(s.write_u32(2), Err(Error::StreamClosed)));
        assert!(matches!(s.write_f64(2.0), Err(Error::StreamClosed)));
        assert_eq!(s.bytes().unwrap().len(), 4);
        Ok(())
    }
}
