//! Byte-level writer for encoding big-endian scalars.

use crate::color::Rgb332;
use crate::error::ScalarResult;
use crate::kind::ScalarKind;
use crate::value::check_string;

/// Accumulates encoded scalars in a growable buffer.
///
/// Call [`finish`](Self::finish) to get the final byte buffer. Every write
/// is infallible: values are range-checked when they are constructed.
#[derive(Debug, Default)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_rgb332(&mut self, color: Rgb332) {
        self.bytes.push(color.packed());
    }

    pub fn write_kind(&mut self, kind: ScalarKind) {
        self.bytes.push(kind.id());
    }

    /// Writes the UTF-8 bytes followed by a NUL terminator.
    ///
    /// The text must not contain a NUL; use [`try_write_str`](Self::try_write_str)
    /// for unchecked input.
    pub fn write_str(&mut self, value: &str) {
        self.bytes.extend_from_slice(value.as_bytes());
        self.bytes.push(0);
    }

    /// Writes a string after checking it has no interior NUL. Nothing is
    /// written on error.
    pub fn try_write_str(&mut self, value: &str) -> ScalarResult<()> {
        check_string(value)?;
        self.write_str(value);
        Ok(())
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = ByteWriter::new();
        assert_eq!(writer.len(), 0);
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn integers_are_big_endian() {
        let mut writer = ByteWriter::new();
        writer.write_u16(0x1234);
        writer.write_i16(-2);
        writer.write_u32(0xDEAD_BEEF);
        writer.write_i32(-1);
        assert_eq!(
            writer.finish(),
            vec![0x12, 0x34, 0xFF, 0xFE, 0xDE, 0xAD, 0xBE, 0xEF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn single_byte_values() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0xAB);
        writer.write_i8(-1);
        writer.write_rgb332(Rgb332::new(7, 0, 3).unwrap());
        writer.write_kind(ScalarKind::String);
        assert_eq!(writer.finish(), vec![0xAB, 0xFF, 0b111_000_11, 0x07]);
    }

    #[test]
    fn string_gets_terminator() {
        let mut writer = ByteWriter::new();
        writer.write_str("hi");
        writer.write_str("");
        assert_eq!(writer.finish(), b"hi\0\0".to_vec());
    }

    #[test]
    fn checked_string_write() {
        let mut writer = ByteWriter::new();
        writer.try_write_str("ok").unwrap();
        assert_eq!(
            writer.try_write_str("a\0b"),
            Err(crate::ScalarError::InteriorNul { offset: 1 })
        );
        assert_eq!(writer.finish(), b"ok\0".to_vec());
    }

    #[test]
    fn with_capacity() {
        let writer = ByteWriter::with_capacity(100);
        assert_eq!(writer.len(), 0);
    }

    #[test]
    fn finish_into() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0xAB);

        let mut buf = vec![0x00, 0x11];
        writer.finish_into(&mut buf);
        assert_eq!(buf, vec![0x00, 0x11, 0xAB]);
    }
}
