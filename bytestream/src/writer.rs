//! Byte-level writer for encoding into caller-provided buffers.

use crate::error::{ByteError, ByteResult};

/// A byte-level writer over a caller-provided buffer.
///
/// All integers are written little-endian. Call [`finish`](Self::finish) to
/// get the number of bytes written.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    /// Creates a writer over the given buffer.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Finishes writing and returns the number of bytes written.
    #[must_use]
    pub fn finish(self) -> usize {
        self.pos
    }

    fn reserve(&mut self, len: usize) -> ByteResult<&mut [u8]> {
        if self.remaining() < len {
            return Err(ByteError::BufferFull {
                needed: len,
                available: self.remaining(),
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&mut self.buf[start..start + len])
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> ByteResult<()> {
        self.reserve(1)?[0] = value;
        Ok(())
    }

    /// Writes a little-endian `u16`.
    pub fn write_u16(&mut self, value: u16) -> ByteResult<()> {
        self.reserve(2)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) -> ByteResult<()> {
        self.reserve(4)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a little-endian `u64`.
    pub fn write_u64(&mut self, value: u64) -> ByteResult<()> {
        self.reserve(8)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a signed byte.
    pub fn write_i8(&mut self, value: i8) -> ByteResult<()> {
        self.write_u8(value as u8)
    }

    /// Writes a little-endian `i16`.
    pub fn write_i16(&mut self, value: i16) -> ByteResult<()> {
        self.write_u16(value as u16)
    }

    /// Writes a little-endian `i32`.
    pub fn write_i32(&mut self, value: i32) -> ByteResult<()> {
        self.write_u32(value as u32)
    }

    /// Writes a little-endian `i64`.
    pub fn write_i64(&mut self, value: i64) -> ByteResult<()> {
        self.write_u64(value as u64)
    }

    /// Writes a little-endian IEEE-754 `f32`.
    pub fn write_f32(&mut self, value: f32) -> ByteResult<()> {
        self.write_u32(value.to_bits())
    }

    /// Writes a little-endian IEEE-754 `f64`.
    pub fn write_f64(&mut self, value: f64) -> ByteResult<()> {
        self.write_u64(value.to_bits())
    }

    /// Writes a raw byte slice verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> ByteResult<()> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }
}
