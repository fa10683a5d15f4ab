//! Error types for COBS framing.

use std::fmt;

/// Result type for framing operations.
pub type WireResult<T> = Result<T, FramingError>;

/// Errors that can occur while decoding a COBS frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FramingError {
    /// Frame does not end with the terminator, or a run length points
    /// past it.
    UnexpectedEnd,

    /// Zero byte found before the terminator.
    UnexpectedZero {
        /// Offset of the zero byte within the frame.
        offset: usize,
    },

    /// Stream decoder buffer would exceed its configured limit.
    FrameTooLarge {
        /// Configured maximum frame size in bytes.
        limit: usize,
        /// Buffered length the rejected byte would have produced.
        actual: usize,
    },
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd => write!(f, "cobs decode error: unexpected end of data"),
            Self::UnexpectedZero { offset } => {
                write!(f, "cobs decode error: unexpected 0 byte at offset {offset}")
            }
            Self::FrameTooLarge { limit, actual } => {
                write!(f, "frame too large: {actual} bytes > {limit}")
            }
        }
    }
}

impl std::error::Error for FramingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unexpected_end() {
        let msg = FramingError::UnexpectedEnd.to_string();
        assert!(msg.contains("unexpected end"));
    }

    #[test]
    fn display_unexpected_zero() {
        let msg = FramingError::UnexpectedZero { offset: 7 }.to_string();
        assert!(msg.contains("unexpected 0 byte"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn display_frame_too_large() {
        let err = FramingError::FrameTooLarge {
            limit: 1024,
            actual: 1025,
        };
        let msg = err.to_string();
        assert!(msg.contains("1024"));
        assert!(msg.contains("1025"));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<FramingError>();
    }
}
