//! Little-endian primitive reading over an in-memory descriptor

use crate::error::{DescriptorError, Result};
use glam::Vec2;

/// Trait for reading descriptor primitives from a byte source
pub trait ByteReader {
    /// Read exactly `N` bytes
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]>;

    /// Read exactly `n` bytes into a new buffer
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>>;

    /// Read an unsigned 32-bit integer
    fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a signed 32-bit integer
    fn read_i32_le(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Read a 64-bit IEEE-754 double
    fn read_f64_le(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Read a stored double and narrow it to single precision.
    ///
    /// Descriptors never store native `f32` values. Reading the double and
    /// truncating is what reference files were authored against, so a raw
    /// 4-byte float read would drift from them.
    fn read_narrowed_f32(&mut self) -> Result<f32> {
        Ok(self.read_f64_le()? as f32)
    }

    /// Read two narrowed doubles as a vector
    fn read_vec2(&mut self) -> Result<Vec2> {
        let x = self.read_narrowed_f32()?;
        let y = self.read_narrowed_f32()?;
        Ok(Vec2::new(x, y))
    }

    /// Read a `u32` length followed by that many bytes
    fn read_length_prefixed(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u32_le()? as usize;
        self.read_bytes(len)
    }
}

/// A cursor for reading binary data from a byte slice
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the beginning of the data
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left after the current offset
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(DescriptorError::UnexpectedEof {
                offset: self.position,
                needed: n,
            })?;
        let data: &'a [u8] = self.data;
        let slice = &data[self.position..end];
        self.position = end;
        Ok(slice)
    }
}

impl ByteReader for Cursor<'_> {
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        Ok(self.take(n)?.to_vec())
    }
}
