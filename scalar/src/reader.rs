//! Byte-level reader with bounded operations.

use crate::color::Rgb332;
use crate::error::{ScalarError, ScalarResult};
use crate::kind::ScalarKind;

/// A cursor over a byte slice for decoding big-endian scalars.
///
/// All read operations are bounds-checked and return errors on failure.
/// A failed read does not advance the cursor, so no partial value is
/// ever consumed.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread tail of the buffer.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    pub fn read_u8(&mut self) -> ScalarResult<u8> {
        let [byte] = self.read_array::<1>(ScalarKind::UInt8)?;
        Ok(byte)
    }

    pub fn read_i8(&mut self) -> ScalarResult<i8> {
        Ok(i8::from_be_bytes(self.read_array(ScalarKind::Int8)?))
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&mut self) -> ScalarResult<u16> {
        Ok(u16::from_be_bytes(self.read_array(ScalarKind::UInt16)?))
    }

    /// Reads a big-endian `i16`.
    pub fn read_i16(&mut self) -> ScalarResult<i16> {
        Ok(i16::from_be_bytes(self.read_array(ScalarKind::Int16)?))
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32(&mut self) -> ScalarResult<u32> {
        Ok(u32::from_be_bytes(self.read_array(ScalarKind::UInt32)?))
    }

    /// Reads a big-endian `i32`.
    pub fn read_i32(&mut self) -> ScalarResult<i32> {
        Ok(i32::from_be_bytes(self.read_array(ScalarKind::Int32)?))
    }

    /// Reads a packed `rrrgggbb` color.
    pub fn read_rgb332(&mut self) -> ScalarResult<Rgb332> {
        let [byte] = self.read_array::<1>(ScalarKind::Rgb332)?;
        Ok(Rgb332::from_packed(byte))
    }

    /// Reads a one-byte type tag and resolves it against the kind registry.
    pub fn read_kind(&mut self) -> ScalarResult<ScalarKind> {
        let [id] = self.peek_array::<1>(ScalarKind::Type)?;
        let kind = ScalarKind::from_id(id)?;
        self.pos += 1;
        Ok(kind)
    }

    /// Reads a NUL-terminated UTF-8 string and consumes the terminator.
    pub fn read_string(&mut self) -> ScalarResult<String> {
        let rest = self.rest();
        let Some(nul) = rest.iter().position(|&b| b == 0) else {
            return Err(ScalarError::UnterminatedString {
                available: rest.len(),
            });
        };
        let text = std::str::from_utf8(&rest[..nul])
            .map_err(|_| ScalarError::InvalidUtf8 { len: nul })?
            .to_owned();
        self.pos += nul + 1;
        Ok(text)
    }

    /// Reads an optional trailing field.
    ///
    /// When the buffer is exhausted the default is returned without
    /// consuming anything; otherwise the field is decoded normally and a
    /// short field is still an error. Only sound for fields that nothing
    /// required follows.
    pub fn read_or<T, F>(&mut self, default: T, read: F) -> ScalarResult<T>
    where
        F: FnOnce(&mut Self) -> ScalarResult<T>,
    {
        if self.is_empty() {
            return Ok(default);
        }
        read(self)
    }

    fn peek_array<const N: usize>(&self, kind: ScalarKind) -> ScalarResult<[u8; N]> {
        let available = self.remaining();
        if N > available {
            return Err(ScalarError::Truncated {
                kind,
                needed: N,
                available,
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        Ok(out)
    }

    fn read_array<const N: usize>(&mut self, kind: ScalarKind) -> ScalarResult<[u8; N]> {
        let out = self.peek_array::<N>(kind)?;
        self.pos += N;
        Ok(out)
    }
}
