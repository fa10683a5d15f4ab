//! Configurable limits for bounded stream decoding.

/// Limits for the stream decoder.
///
/// These bound the accumulation buffer so a peer that never sends a
/// terminator cannot grow memory without limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum encoded frame size in bytes, terminator excluded.
    pub max_frame_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Far above any single command; commands are a few dozen bytes.
            max_frame_bytes: 64 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_frame_bytes: 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_frame_bytes: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_frame_bytes() {
        let limits = Limits::default();
        assert_eq!(limits.max_frame_bytes, 64 * 1024);
    }

    #[test]
    fn testing_limits_smaller() {
        assert!(Limits::for_testing().max_frame_bytes < Limits::default().max_frame_bytes);
    }

    #[test]
    fn unlimited_limits() {
        assert_eq!(Limits::unlimited().max_frame_bytes, usize::MAX);
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_frame_bytes, 1024);
    }
}
