//! Error types for scalar encoding and decoding.

use std::fmt;

use crate::kind::ScalarKind;

/// Result type for scalar operations.
pub type ScalarResult<T> = Result<T, ScalarError>;

/// Errors that can occur while constructing, encoding or decoding scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarError {
    /// Integer does not fit the bit width and signedness of its kind.
    OutOfRange {
        /// The kind that was being constructed.
        kind: ScalarKind,
        /// The rejected raw value.
        value: i64,
    },

    /// A packed color channel exceeds its bit allocation.
    ChannelOutOfRange {
        /// Which channel was rejected.
        channel: Channel,
        /// The rejected channel value.
        value: i64,
        /// Largest value the channel can hold.
        max: u8,
    },

    /// Type tag does not name a registered scalar kind.
    UnknownType {
        /// The unregistered type id.
        id: u8,
    },

    /// Fewer bytes are available than the kind's fixed width.
    Truncated {
        /// The kind that was being decoded.
        kind: ScalarKind,
        /// Number of bytes required.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// No NUL terminator before the end of the buffer.
    UnterminatedString {
        /// Number of bytes scanned.
        available: usize,
    },

    /// String contains a NUL byte, which would end it early on the wire.
    InteriorNul {
        /// Byte offset of the first NUL.
        offset: usize,
    },

    /// String bytes are not valid UTF-8.
    InvalidUtf8 {
        /// Length of the rejected byte run.
        len: usize,
    },

    /// Text could not be parsed as the requested kind.
    Parse {
        /// The kind that was requested.
        kind: ScalarKind,
        /// The rejected input text.
        input: String,
    },
}

impl ScalarError {
    /// Returns `true` for failures caused by too few input bytes.
    #[must_use]
    pub const fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::Truncated { .. } | Self::UnterminatedString { .. }
        )
    }

    /// Returns `true` for construction-time range violations.
    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. }
                | Self::ChannelOutOfRange { .. }
                | Self::UnknownType { .. }
                | Self::InteriorNul { .. }
        )
    }
}

/// A channel of a packed RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl fmt::Display for ScalarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { kind, value } => {
                write!(f, "value {value} out of range for {kind}")
            }
            Self::ChannelOutOfRange {
                channel,
                value,
                max,
            } => {
                write!(f, "{channel} channel value {value} out of range 0..={max}")
            }
            Self::UnknownType { id } => write!(f, "unknown type id 0x{id:02X}"),
            Self::Truncated {
                kind,
                needed,
                available,
            } => {
                write!(
                    f,
                    "truncated {kind}: need {needed} bytes, have {available}"
                )
            }
            Self::UnterminatedString { available } => {
                write!(f, "string not terminated within {available} bytes")
            }
            Self::InteriorNul { offset } => {
                write!(f, "string contains a NUL byte at offset {offset}")
            }
            Self::InvalidUtf8 { len } => {
                write!(f, "string of {len} bytes is not valid utf-8")
            }
            Self::Parse { kind, input } => {
                write!(f, "cannot parse {input:?} as {kind}")
            }
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for ScalarError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_out_of_range() {
        let err = ScalarError::OutOfRange {
            kind: ScalarKind::UInt8,
            value: 256,
        };
        let msg = err.to_string();
        assert!(msg.contains("256"), "should mention the value");
        assert!(msg.contains("uint8"), "should mention the kind");
    }

    #[test]
    fn error_display_channel_out_of_range() {
        let err = ScalarError::ChannelOutOfRange {
            channel: Channel::Blue,
            value: 4,
            max: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("blue"));
        assert!(msg.contains("0..=3"));
    }

    #[test]
    fn error_display_truncated() {
        let err = ScalarError::Truncated {
            kind: ScalarKind::UInt16,
            needed: 2,
            available: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("truncated"));
        assert!(msg.contains("need 2"));
        assert!(msg.contains("have 1"));
    }

    #[test]
    fn error_display_unknown_type() {
        let err = ScalarError::UnknownType { id: 0x2A };
        assert!(err.to_string().contains("0x2A"));
    }

    #[test]
    fn error_display_interior_nul() {
        let err = ScalarError::InteriorNul { offset: 1 };
        assert!(err.to_string().contains("offset 1"));
        assert!(err.is_range());
        assert!(!err.is_truncation());
    }

    #[test]
    fn error_classification() {
        assert!(ScalarError::UnterminatedString { available: 3 }.is_truncation());
        assert!(ScalarError::UnknownType { id: 99 }.is_range());
        assert!(!ScalarError::InvalidUtf8 { len: 1 }.is_range());
        assert!(!ScalarError::InvalidUtf8 { len: 1 }.is_truncation());
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<ScalarError>();
    }
}
