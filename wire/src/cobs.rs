//! Consistent Overhead Byte Stuffing.
//!
//! A frame is the stuffed payload followed by a single `0x00` terminator.
//! The stuffed body never contains a zero byte: each block starts with a
//! length code `n` meaning "copy the next `n - 1` bytes, then an implied
//! zero". Code `0xFF` marks a full 254-byte block with no implied zero, so
//! every code fits in one byte regardless of payload length.

use crate::error::{FramingError, WireResult};

/// Frame terminator.
pub const DELIMITER: u8 = 0x00;

/// Longest run of non-zero bytes a single block can carry.
pub const MAX_BLOCK_DATA: usize = 254;

const FULL_BLOCK: u8 = 0xFF;

/// Returns the largest possible frame size for a payload of `len` bytes,
/// terminator included.
#[must_use]
pub const fn max_encoded_len(len: usize) -> usize {
    len + len / MAX_BLOCK_DATA + 2
}

/// Encodes `payload` into a terminated frame.
///
/// `encode(&[])` is `[0x01, 0x00]`.
#[must_use]
pub fn encode(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(max_encoded_len(payload.len()));
    encode_into(payload, &mut out);
    out
}

/// Appends the terminated frame for `payload` to `out`.
pub fn encode_into(payload: &[u8], out: &mut Vec<u8>) {
    out.reserve(max_encoded_len(payload.len()));
    let mut code_at = out.len();
    out.push(0);
    let mut code: u8 = 1;

    for &byte in payload {
        if byte == DELIMITER {
            out[code_at] = code;
            code_at = out.len();
            out.push(0);
            code = 1;
            continue;
        }
        out.push(byte);
        code += 1;
        if code == FULL_BLOCK {
            out[code_at] = code;
            code_at = out.len();
            out.push(0);
            code = 1;
        }
    }

    out[code_at] = code;
    out.push(DELIMITER);
}

/// Decodes a terminated frame back into its payload.
///
/// Empty input decodes to an empty payload.
pub fn decode(frame: &[u8]) -> WireResult<Vec<u8>> {
    let mut out = Vec::with_capacity(frame.len());
    decode_into(frame, &mut out)?;
    Ok(out)
}

/// Decodes a terminated frame, appending the payload to `out`.
///
/// On error `out` may hold a partial payload.
pub fn decode_into(frame: &[u8], out: &mut Vec<u8>) -> WireResult<()> {
    let Some((&last, body)) = frame.split_last() else {
        return Ok(());
    };
    if last != DELIMITER {
        return Err(FramingError::UnexpectedEnd);
    }

    let mut index = 0;
    while index < body.len() {
        let code = body[index];
        if code == DELIMITER {
            return Err(FramingError::UnexpectedZero { offset: index });
        }
        index += 1;

        let end = index + usize::from(code) - 1;
        if end > body.len() {
            return Err(FramingError::UnexpectedEnd);
        }
        let block = &body[index..end];
        if let Some(pos) = block.iter().position(|&b| b == DELIMITER) {
            return Err(FramingError::UnexpectedZero { offset: index + pos });
        }
        out.extend_from_slice(block);
        index = end;

        // The zero implied by the last block is the terminator itself.
        if code != FULL_BLOCK && index < body.len() {
            out.push(0);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_empty() {
        assert_eq!(encode(&[]), vec![0x01, 0x00]);
    }

    #[test]
    fn encode_single_zero() {
        assert_eq!(encode(&[0]), vec![0x01, 0x01, 0x00]);
    }

    #[test]
    fn encode_known_vectors() {
        assert_eq!(encode(&[0, 0]), vec![0x01, 0x01, 0x01, 0x00]);
        assert_eq!(encode(&[0x11, 0x22, 0x00, 0x33]), vec![0x03, 0x11, 0x22, 0x02, 0x33, 0x00]);
        assert_eq!(encode(&[0x11, 0x22, 0x33, 0x44]), vec![0x05, 0x11, 0x22, 0x33, 0x44, 0x00]);
        assert_eq!(encode(&[0x11, 0x00, 0x00, 0x00]), vec![0x02, 0x11, 0x01, 0x01, 0x01, 0x00]);
    }

    #[test]
    fn encode_clear_screen_command() {
        assert_eq!(encode(&[0x01]), vec![0x02, 0x01, 0x00]);
    }

    #[test]
    fn encode_full_block() {
        let payload: Vec<u8> = (1..=254).collect();
        let frame = encode(&payload);
        assert_eq!(frame[0], 0xFF);
        assert_eq!(&frame[1..255], payload.as_slice());
        assert_eq!(&frame[255..], &[0x01, 0x00]);
        assert!(frame.len() <= max_encoded_len(payload.len()));
    }

    #[test]
    fn encode_over_full_block() {
        let payload = vec![0xAA; 255];
        let frame = encode(&payload);
        assert_eq!(frame[0], 0xFF);
        assert_eq!(frame[255], 0x02);
        assert_eq!(frame[256], 0xAA);
        assert_eq!(frame[257], 0x00);
        assert_eq!(decode(&frame).unwrap(), payload);
    }

    #[test]
    fn encoded_body_has_no_zero() {
        let payload: Vec<u8> = (0..=255).cycle().take(1000).collect();
        let frame = encode(&payload);
        let (last, body) = frame.split_last().unwrap();
        assert_eq!(*last, 0);
        assert!(!body.contains(&0));
        assert!(frame.len() <= max_encoded_len(payload.len()));
    }

    #[test]
    fn encode_into_appends() {
        let mut out = vec![0xEE];
        encode_into(&[0x05], &mut out);
        assert_eq!(out, vec![0xEE, 0x02, 0x05, 0x00]);
    }

    #[test]
    fn decode_empty_input() {
        assert_eq!(decode(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_terminator_only() {
        assert_eq!(decode(&[0x00]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_known_vectors() {
        assert_eq!(decode(&[0x01, 0x00]).unwrap(), Vec::<u8>::new());
        assert_eq!(decode(&[0x01, 0x01, 0x00]).unwrap(), vec![0x00]);
        assert_eq!(
            decode(&[0x03, 0x11, 0x22, 0x02, 0x33, 0x00]).unwrap(),
            vec![0x11, 0x22, 0x00, 0x33]
        );
    }

    #[test]
    fn decode_missing_terminator() {
        assert_eq!(decode(&[1, 2, 3]), Err(FramingError::UnexpectedEnd));
    }

    #[test]
    fn decode_run_past_terminator() {
        assert_eq!(decode(&[0x05, 0x11, 0x00]), Err(FramingError::UnexpectedEnd));
    }

    #[test]
    fn decode_zero_code_before_terminator() {
        assert_eq!(
            decode(&[0x01, 0x00, 0x00]),
            Err(FramingError::UnexpectedZero { offset: 1 })
        );
    }

    #[test]
    fn decode_zero_inside_block() {
        assert_eq!(
            decode(&[0x03, 0x11, 0x00, 0x00]),
            Err(FramingError::UnexpectedZero { offset: 2 })
        );
    }

    #[test]
    fn decode_into_appends() {
        let mut out = vec![0xEE];
        decode_into(&[0x02, 0x05, 0x00], &mut out).unwrap();
        assert_eq!(out, vec![0xEE, 0x05]);
    }
}
