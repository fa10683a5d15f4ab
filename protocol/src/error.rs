//! Error types for command decoding.

use std::fmt;

use scalar::ScalarError;
use wire::FramingError;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while turning bytes into commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload had no command id byte.
    EmptyInput,

    /// First byte is not a registered command id.
    UnknownCommandId { id: u8 },

    /// A command field failed to decode.
    Scalar(ScalarError),

    /// The frame around the payload was malformed.
    Framing(FramingError),
}

impl ProtocolError {
    /// Returns `true` if the failure happened below the command layer.
    #[must_use]
    pub const fn is_framing(&self) -> bool {
        matches!(self, Self::Framing(_))
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty command payload"),
            Self::UnknownCommandId { id } => write!(f, "unknown command id 0x{id:02x}"),
            Self::Scalar(e) => write!(f, "field error: {e}"),
            Self::Framing(e) => write!(f, "framing error: {e}"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scalar(e) => Some(e),
            Self::Framing(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScalarError> for ProtocolError {
    fn from(err: ScalarError) -> Self {
        Self::Scalar(err)
    }
}

impl From<FramingError> for ProtocolError {
    fn from(err: FramingError) -> Self {
        Self::Framing(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalar::ScalarKind;
    use std::error::Error;

    #[test]
    fn unknown_id_display_is_hex() {
        let err = ProtocolError::UnknownCommandId { id: 0xFF };
        assert_eq!(err.to_string(), "unknown command id 0xff");
    }

    #[test]
    fn from_scalar_error() {
        let inner = ScalarError::Truncated {
            kind: ScalarKind::UInt16,
            needed: 2,
            available: 1,
        };
        let err: ProtocolError = inner.clone().into();
        assert_eq!(err, ProtocolError::Scalar(inner));
        assert!(err.source().is_some());
        assert!(!err.is_framing());
    }

    #[test]
    fn from_framing_error() {
        let err: ProtocolError = FramingError::UnexpectedEnd.into();
        assert!(err.is_framing());
        assert!(err.to_string().contains("unexpected end"));
    }

    #[test]
    fn empty_input_has_no_source() {
        assert!(ProtocolError::EmptyInput.source().is_none());
    }
}
