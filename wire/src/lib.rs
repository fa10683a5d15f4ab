//! Byte-stream framing for the rigviz protocol.
//!
//! This crate turns command payloads into self-delimiting COBS frames and
//! reassembles them from a byte stream. It does not know about commands,
//! only the structure of frames.
//!
//! # Design Principles
//!
//! - **Stable wire format** - Every frame ends with a single `0x00` byte.
//! - **Bounded decoding** - The stream decoder buffer is capped by [`Limits`].
//! - **No domain knowledge** - This crate handles framing, not drawing.
//!
//! # Example
//!
//! ```
//! use wire::{cobs, StreamDecoder};
//!
//! let frame = cobs::encode(&[0x10, 0x00, 0x2A]);
//! assert!(!frame[..frame.len() - 1].contains(&0));
//!
//! let mut decoder = StreamDecoder::new();
//! let mut payloads = Vec::new();
//! decoder.feed(&frame, |payload| payloads.push(payload.unwrap()));
//! assert_eq!(payloads, vec![vec![0x10, 0x00, 0x2A]]);
//! ```

pub mod cobs;
mod error;
mod limits;
mod stream;

pub use error::{FramingError, WireResult};
pub use limits::Limits;
pub use stream::StreamDecoder;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = Limits::default();
        let _ = StreamDecoder::new();
        let _ = cobs::DELIMITER;
        let _ = cobs::MAX_BLOCK_DATA;
        let _: WireResult<()> = Ok(());
    }

    #[test]
    fn limits_default_is_reasonable() {
        let limits = Limits::default();
        assert!(
            limits.max_frame_bytes >= cobs::max_encoded_len(1024),
            "should allow at least 1KB payloads"
        );
    }

    #[test]
    fn stream_matches_one_shot_decode() {
        let payload = [0x12, 0x00, 0x01, 0x00, 0x00, 0xFF];
        let frame = cobs::encode(&payload);

        let mut decoder = StreamDecoder::new();
        let mut last = None;
        for &byte in &frame {
            last = decoder.receive(byte).unwrap();
        }
        assert_eq!(last, Some(cobs::decode(&frame).unwrap()));
    }
}
