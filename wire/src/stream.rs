//! Incremental frame reassembly from a byte stream.

use crate::cobs::{self, DELIMITER};
use crate::error::{FramingError, WireResult};
use crate::limits::Limits;

/// Accumulates bytes until a terminator arrives, then decodes the frame.
///
/// After every terminator the buffer is empty again, whether or not the
/// frame decoded, so one damaged frame never poisons the next.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
    limits: Limits,
    discarding: bool,
}

impl StreamDecoder {
    /// Creates a decoder with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with custom limits.
    #[must_use]
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            buffer: Vec::new(),
            limits,
            discarding: false,
        }
    }

    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Number of bytes waiting for a terminator.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drops any partial frame.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }

    /// Consumes one byte.
    ///
    /// Returns `Ok(Some(payload))` when `byte` completes a frame and
    /// `Ok(None)` while a frame is still in progress. An oversized frame
    /// reports [`FramingError::FrameTooLarge`] once, and its remaining bytes
    /// are skipped up to the next terminator.
    pub fn receive(&mut self, byte: u8) -> WireResult<Option<Vec<u8>>> {
        if byte == DELIMITER {
            if self.discarding {
                self.discarding = false;
                return Ok(None);
            }
            self.buffer.push(DELIMITER);
            let decoded = cobs::decode(&self.buffer);
            self.buffer.clear();
            return decoded.map(Some);
        }

        if self.discarding {
            return Ok(None);
        }
        if self.buffer.len() >= self.limits.max_frame_bytes {
            let actual = self.buffer.len() + 1;
            self.buffer.clear();
            self.discarding = true;
            return Err(FramingError::FrameTooLarge {
                limit: self.limits.max_frame_bytes,
                actual,
            });
        }
        self.buffer.push(byte);
        Ok(None)
    }

    /// Consumes a chunk of bytes, calling `on_frame` for every completed
    /// frame or framing error, in stream order.
    pub fn feed<F>(&mut self, bytes: &[u8], mut on_frame: F)
    where
        F: FnMut(WireResult<Vec<u8>>),
    {
        for &byte in bytes {
            match self.receive(byte) {
                Ok(Some(payload)) => on_frame(Ok(payload)),
                Ok(None) => {}
                Err(err) => on_frame(Err(err)),
            }
        }
    }
}
