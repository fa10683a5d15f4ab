//! Frames from an encoder without the 254-byte block cap.
//!
//! Older visualizer clients stuff each zero-free run as one `run + 1` code and
//! decode every block as "copy `n - 1`, then a zero unless at the end". The two
//! schemes agree until a run reaches 254 bytes.

use proptest::prelude::*;
use wire::cobs;

/// `None` when a run is too long for a one-byte code.
fn uncapped_encode(payload: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(payload.len() + 2);
    for run in payload.split(|&b| b == 0) {
        out.push(u8::try_from(run.len() + 1).ok()?);
        out.extend_from_slice(run);
    }
    out.push(0);
    Some(out)
}

fn uncapped_decode(frame: &[u8]) -> Vec<u8> {
    let body = &frame[..frame.len() - 1];
    let mut out = Vec::new();
    let mut index = 0;
    while index < body.len() {
        let code = usize::from(body[index]);
        index += 1;
        out.extend_from_slice(&body[index..index + code - 1]);
        index += code - 1;
        if index < body.len() {
            out.push(0);
        }
    }
    out
}

fn full_run_then_zero() -> Vec<u8> {
    let mut payload = vec![0xAA; 254];
    payload.extend_from_slice(&[0x00, 0x01]);
    payload
}

#[test]
fn full_run_then_zero_frames_differ() {
    let payload = full_run_then_zero();

    let mut uncapped = vec![0xFF];
    uncapped.extend_from_slice(&[0xAA; 254]);
    uncapped.extend_from_slice(&[0x02, 0x01, 0x00]);
    assert_eq!(uncapped_encode(&payload).unwrap(), uncapped);

    let mut capped = vec![0xFF];
    capped.extend_from_slice(&[0xAA; 254]);
    capped.extend_from_slice(&[0x01, 0x02, 0x01, 0x00]);
    let ours = cobs::encode(&payload);
    assert_eq!(ours, capped);
    assert_ne!(ours, uncapped);
    assert_eq!(cobs::decode(&ours).unwrap(), payload);
}

#[test]
fn full_run_then_zero_decoders_disagree() {
    let payload = full_run_then_zero();

    // Our decoder drops the zero from an uncapped frame.
    let uncapped = uncapped_encode(&payload).unwrap();
    let mut lost_zero = vec![0xAA; 254];
    lost_zero.push(0x01);
    assert_eq!(cobs::decode(&uncapped).unwrap(), lost_zero);

    // The uncapped decoder adds one to ours.
    let mut extra_zero = vec![0xAA; 254];
    extra_zero.extend_from_slice(&[0x00, 0x00, 0x01]);
    assert_eq!(uncapped_decode(&cobs::encode(&payload)), extra_zero);
}

#[test]
fn trailing_full_run_decodes_either_way() {
    let payload = vec![0xAA; 254];
    let uncapped = uncapped_encode(&payload).unwrap();
    assert_eq!(uncapped.len(), 256);
    assert_eq!(cobs::decode(&uncapped).unwrap(), payload);

    // Our trailing empty block reads as a zero to the uncapped decoder.
    let mut extra_zero = payload.clone();
    extra_zero.push(0);
    assert_eq!(uncapped_decode(&cobs::encode(&payload)), extra_zero);
}

#[test]
fn uncapped_encoder_cannot_carry_long_runs() {
    assert_eq!(uncapped_encode(&[0x5A; 255]), None);
    let frame = cobs::encode(&[0x5A; 255]);
    assert_eq!(cobs::decode(&frame).unwrap(), vec![0x5A; 255]);
}

fn short_run_payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::collection::vec(1u8..=255, 0..254), 1..4)
        .prop_map(|runs| runs.join(&0u8))
}

proptest! {
    #[test]
    fn short_runs_match_uncapped(payload in short_run_payload()) {
        let ours = cobs::encode(&payload);
        prop_assert_eq!(Some(ours.clone()), uncapped_encode(&payload));
        prop_assert_eq!(uncapped_decode(&ours), payload);
    }
}
