//! Typed scalar codec and the self-describing scalar value.

use std::fmt;

use crate::color::Rgb332;
use crate::error::{ScalarError, ScalarResult};
use crate::kind::ScalarKind;
use crate::reader::ByteReader;
use crate::writer::ByteWriter;

/// A Rust type with a fixed wire encoding.
pub trait WireScalar: Sized {
    /// The registered kind this type encodes as.
    const KIND: ScalarKind;

    /// Decodes one value, advancing the reader past it.
    fn read(reader: &mut ByteReader<'_>) -> ScalarResult<Self>;

    /// Appends the encoded value.
    fn write(&self, writer: &mut ByteWriter);
}

macro_rules! impl_wire_scalar {
    ($ty:ty, $kind:ident, $read:ident, $write:ident) => {
        impl WireScalar for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            fn read(reader: &mut ByteReader<'_>) -> ScalarResult<Self> {
                reader.$read()
            }

            fn write(&self, writer: &mut ByteWriter) {
                writer.$write(*self);
            }
        }
    };
}

impl_wire_scalar!(u8, UInt8, read_u8, write_u8);
impl_wire_scalar!(i8, Int8, read_i8, write_i8);
impl_wire_scalar!(u16, UInt16, read_u16, write_u16);
impl_wire_scalar!(i16, Int16, read_i16, write_i16);
impl_wire_scalar!(u32, UInt32, read_u32, write_u32);
impl_wire_scalar!(i32, Int32, read_i32, write_i32);
impl_wire_scalar!(Rgb332, Rgb332, read_rgb332, write_rgb332);
impl_wire_scalar!(ScalarKind, Type, read_kind, write_kind);

impl WireScalar for () {
    const KIND: ScalarKind = ScalarKind::Nil;

    fn read(_reader: &mut ByteReader<'_>) -> ScalarResult<Self> {
        Ok(())
    }

    fn write(&self, _writer: &mut ByteWriter) {}
}

impl WireScalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn read(reader: &mut ByteReader<'_>) -> ScalarResult<Self> {
        reader.read_string()
    }

    fn write(&self, writer: &mut ByteWriter) {
        writer.write_str(self);
    }
}

/// Decodes one `T` from the front of `bytes`, returning the unread rest.
pub fn decode<T: WireScalar>(bytes: &[u8]) -> ScalarResult<(T, &[u8])> {
    let mut reader = ByteReader::new(bytes);
    let value = T::read(&mut reader)?;
    Ok((value, reader.rest()))
}

/// Decodes an optional trailing `T`, yielding `default` for an empty slice.
pub fn decode_or<T: WireScalar>(bytes: &[u8], default: T) -> ScalarResult<(T, &[u8])> {
    let mut reader = ByteReader::new(bytes);
    let value = reader.read_or(default, T::read)?;
    Ok((value, reader.rest()))
}

/// Encodes one `T` into a fresh buffer.
#[must_use]
pub fn encode<T: WireScalar>(value: &T) -> Vec<u8> {
    let mut writer = ByteWriter::new();
    value.write(&mut writer);
    writer.finish()
}

/// A dynamically typed scalar, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value", rename_all = "lowercase"))]
pub enum ScalarValue {
    Nil,
    UInt8(u8),
    Int8(i8),
    UInt16(u16),
    Int16(i16),
    UInt32(u32),
    Int32(i32),
    String(String),
    Rgb332(Rgb332),
    Type(ScalarKind),
}

impl ScalarValue {
    /// Builds an integer scalar, rejecting values outside the kind's range.
    ///
    /// Non-integer kinds have no integer domain and always fail.
    pub fn integer(kind: ScalarKind, raw: i64) -> ScalarResult<Self> {
        let out_of_range = || ScalarError::OutOfRange { kind, value: raw };
        let value = match kind {
            ScalarKind::UInt8 => Self::UInt8(u8::try_from(raw).map_err(|_| out_of_range())?),
            ScalarKind::Int8 => Self::Int8(i8::try_from(raw).map_err(|_| out_of_range())?),
            ScalarKind::UInt16 => Self::UInt16(u16::try_from(raw).map_err(|_| out_of_range())?),
            ScalarKind::Int16 => Self::Int16(i16::try_from(raw).map_err(|_| out_of_range())?),
            ScalarKind::UInt32 => Self::UInt32(u32::try_from(raw).map_err(|_| out_of_range())?),
            ScalarKind::Int32 => Self::Int32(i32::try_from(raw).map_err(|_| out_of_range())?),
            _ => return Err(out_of_range()),
        };
        Ok(value)
    }

    /// Builds a string scalar, rejecting text with an interior NUL.
    pub fn string(text: impl Into<String>) -> ScalarResult<Self> {
        let text = text.into();
        check_string(&text)?;
        Ok(Self::String(text))
    }

    /// Builds a type tag from its raw id.
    pub fn type_tag(id: u8) -> ScalarResult<Self> {
        ScalarKind::from_id(id).map(Self::Type)
    }

    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Nil => ScalarKind::Nil,
            Self::UInt8(_) => ScalarKind::UInt8,
            Self::Int8(_) => ScalarKind::Int8,
            Self::UInt16(_) => ScalarKind::UInt16,
            Self::Int16(_) => ScalarKind::Int16,
            Self::UInt32(_) => ScalarKind::UInt32,
            Self::Int32(_) => ScalarKind::Int32,
            Self::String(_) => ScalarKind::String,
            Self::Rgb332(_) => ScalarKind::Rgb332,
            Self::Type(_) => ScalarKind::Type,
        }
    }

    /// Number of bytes [`encode`](Self::encode) produces.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::String(text) => text.len() + 1,
            other => other.kind().fixed_width().unwrap_or_default(),
        }
    }

    pub fn write_to(&self, writer: &mut ByteWriter) {
        match self {
            Self::Nil => {}
            Self::UInt8(v) => v.write(writer),
            Self::Int8(v) => v.write(writer),
            Self::UInt16(v) => v.write(writer),
            Self::Int16(v) => v.write(writer),
            Self::UInt32(v) => v.write(writer),
            Self::Int32(v) => v.write(writer),
            Self::String(v) => v.write(writer),
            Self::Rgb332(v) => v.write(writer),
            Self::Type(v) => v.write(writer),
        }
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(self.encoded_len());
        self.write_to(&mut writer);
        writer.finish()
    }

    /// Reads one value of the given kind.
    pub fn read(kind: ScalarKind, reader: &mut ByteReader<'_>) -> ScalarResult<Self> {
        let value = match kind {
            ScalarKind::Nil => Self::Nil,
            ScalarKind::UInt8 => Self::UInt8(reader.read_u8()?),
            ScalarKind::Int8 => Self::Int8(reader.read_i8()?),
            ScalarKind::UInt16 => Self::UInt16(reader.read_u16()?),
            ScalarKind::Int16 => Self::Int16(reader.read_i16()?),
            ScalarKind::UInt32 => Self::UInt32(reader.read_u32()?),
            ScalarKind::Int32 => Self::Int32(reader.read_i32()?),
            ScalarKind::String => Self::String(reader.read_string()?),
            ScalarKind::Rgb332 => Self::Rgb332(reader.read_rgb332()?),
            ScalarKind::Type => Self::Type(reader.read_kind()?),
        };
        Ok(value)
    }

    /// Decodes one value of the given kind from the front of `bytes`.
    pub fn decode(kind: ScalarKind, bytes: &[u8]) -> ScalarResult<(Self, &[u8])> {
        let mut reader = ByteReader::new(bytes);
        let value = Self::read(kind, &mut reader)?;
        Ok((value, reader.rest()))
    }

    /// Parses the text form produced by `Display`.
    ///
    /// Type tags have no text form and are always rejected.
    pub fn parse(kind: ScalarKind, text: &str) -> ScalarResult<Self> {
        let parse_err = || ScalarError::Parse {
            kind,
            input: text.to_string(),
        };
        match kind {
            ScalarKind::Nil if text.trim() == "nil" => Ok(Self::Nil),
            ScalarKind::Nil | ScalarKind::Type => Err(parse_err()),
            ScalarKind::String => Self::string(text),
            ScalarKind::Rgb332 => text.parse().map(Self::Rgb332),
            integer => {
                let raw = text.trim().parse::<i64>().map_err(|_| parse_err())?;
                Self::integer(integer, raw)
            }
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::UInt8(v) => write!(f, "{v}"),
            Self::Int8(v) => write!(f, "{v}"),
            Self::UInt16(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
            Self::Rgb332(v) => write!(f, "{v}"),
            Self::Type(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_native {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ScalarValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_native!(
    u8 => UInt8,
    i8 => Int8,
    u16 => UInt16,
    i16 => Int16,
    u32 => UInt32,
    i32 => Int32,
    Rgb332 => Rgb332,
    ScalarKind => Type,
);

impl TryFrom<String> for ScalarValue {
    type Error = ScalarError;

    fn try_from(text: String) -> ScalarResult<Self> {
        Self::string(text)
    }
}

/// Strings are NUL-terminated on the wire, so a NUL inside one cannot be
/// represented.
pub(crate) fn check_string(text: &str) -> ScalarResult<()> {
    match text.bytes().position(|byte| byte == 0) {
        Some(offset) => Err(ScalarError::InteriorNul { offset }),
        None => Ok(()),
    }
}
