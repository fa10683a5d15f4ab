//! Registry of self-describing scalar type ids.

use std::fmt;

use crate::error::{ScalarError, ScalarResult};

/// Scalar kinds and their one-byte type ids.
///
/// The id doubles as the wire form of a `Type` scalar, so the mapping is
/// fixed and must match on both ends of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum ScalarKind {
    Nil = 0x00,
    UInt8 = 0x01,
    Int8 = 0x02,
    UInt16 = 0x03,
    Int16 = 0x04,
    UInt32 = 0x05,
    Int32 = 0x06,
    String = 0x07,
    Rgb332 = 0x08,
    Type = 0x09,
}

impl ScalarKind {
    /// All registered kinds in id order.
    pub const ALL: [Self; 10] = [
        Self::Nil,
        Self::UInt8,
        Self::Int8,
        Self::UInt16,
        Self::Int16,
        Self::UInt32,
        Self::Int32,
        Self::String,
        Self::Rgb332,
        Self::Type,
    ];

    /// Resolves a type id.
    pub fn from_id(id: u8) -> ScalarResult<Self> {
        match id {
            0x00 => Ok(Self::Nil),
            0x01 => Ok(Self::UInt8),
            0x02 => Ok(Self::Int8),
            0x03 => Ok(Self::UInt16),
            0x04 => Ok(Self::Int16),
            0x05 => Ok(Self::UInt32),
            0x06 => Ok(Self::Int32),
            0x07 => Ok(Self::String),
            0x08 => Ok(Self::Rgb332),
            0x09 => Ok(Self::Type),
            _ => Err(ScalarError::UnknownType { id }),
        }
    }

    /// Returns the type id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Encoded width in bytes, or `None` for the NUL-terminated string.
    #[must_use]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Nil => Some(0),
            Self::UInt8 | Self::Int8 | Self::Rgb332 | Self::Type => Some(1),
            Self::UInt16 | Self::Int16 => Some(2),
            Self::UInt32 | Self::Int32 => Some(4),
            Self::String => None,
        }
    }

    /// Inclusive integer range for integer kinds.
    #[must_use]
    pub const fn integer_range(self) -> Option<(i64, i64)> {
        match self {
            Self::UInt8 => Some((0, u8::MAX as i64)),
            Self::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::UInt16 => Some((0, u16::MAX as i64)),
            Self::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            Self::UInt32 => Some((0, u32::MAX as i64)),
            Self::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            _ => None,
        }
    }

    /// Lowercase name used in text output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::UInt8 => "uint8",
            Self::Int8 => "int8",
            Self::UInt16 => "uint16",
            Self::Int16 => "int16",
            Self::UInt32 => "uint32",
            Self::Int32 => "int32",
            Self::String => "string",
            Self::Rgb332 => "rgb332",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ScalarKind {
    type Error = ScalarError;

    fn try_from(id: u8) -> ScalarResult<Self> {
        Self::from_id(id)
    }
}

impl From<ScalarKind> for u8 {
    fn from(kind: ScalarKind) -> Self {
        kind.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip_for_every_kind() {
        for kind in ScalarKind::ALL {
            assert_eq!(ScalarKind::from_id(kind.id()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_id_rejected() {
        assert_eq!(
            ScalarKind::from_id(0x0A),
            Err(ScalarError::UnknownType { id: 0x0A })
        );
        assert!(ScalarKind::try_from(0xFF).is_err());
    }

    #[test]
    fn fixed_widths() {
        assert_eq!(ScalarKind::Nil.fixed_width(), Some(0));
        assert_eq!(ScalarKind::UInt8.fixed_width(), Some(1));
        assert_eq!(ScalarKind::Int16.fixed_width(), Some(2));
        assert_eq!(ScalarKind::UInt32.fixed_width(), Some(4));
        assert_eq!(ScalarKind::Rgb332.fixed_width(), Some(1));
        assert_eq!(ScalarKind::Type.fixed_width(), Some(1));
        assert_eq!(ScalarKind::String.fixed_width(), None);
    }

    #[test]
    fn integer_ranges() {
        assert_eq!(ScalarKind::UInt8.integer_range(), Some((0, 255)));
        assert_eq!(ScalarKind::Int8.integer_range(), Some((-128, 127)));
        assert_eq!(
            ScalarKind::Int32.integer_range(),
            Some((-2_147_483_648, 2_147_483_647))
        );
        assert_eq!(ScalarKind::String.integer_range(), None);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ScalarKind::Rgb332.to_string(), "rgb332");
    }
}
