//! Fixed-width scalar codec for the rigviz protocol.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for big-endian
//! scalar encoding, the [`ScalarKind`] type registry, the dynamically typed
//! [`ScalarValue`], and the packed [`Rgb332`] color.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked and never panic.
//! - **Validate on construction** - Out-of-range values are rejected, never clamped.
//! - **No domain knowledge** - This crate knows nothing about commands or frames.
//!
//! # Example
//!
//! ```
//! use scalar::{ByteReader, ByteWriter, Rgb332};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u16(640);
//! writer.write_rgb332(Rgb332::new(7, 0, 3).unwrap());
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, [0x02, 0x80, 0b111_000_11]);
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u16().unwrap(), 640);
//! assert_eq!(reader.read_rgb332().unwrap(), Rgb332::MAGENTA);
//! // Exhausted input yields the default for an optional trailing field.
//! assert_eq!(reader.read_or(1, ByteReader::read_u16).unwrap(), 1);
//! ```

mod color;
mod error;
mod kind;
mod reader;
mod value;
mod writer;

pub use color::{Rgb332, Rgb888};
pub use error::{Channel, ScalarError, ScalarResult};
pub use kind::ScalarKind;
pub use reader::ByteReader;
pub use value::{decode, decode_or, encode, ScalarValue, WireScalar};
pub use writer::ByteWriter;
