#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{cobs, Limits, StreamDecoder};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through the stream decoder must never panic, and the
    // buffer must never outgrow its limit.
    let limits = Limits::for_testing();
    let mut decoder = StreamDecoder::with_limits(limits.clone());
    for &byte in data {
        let _ = decoder.receive(byte);
        assert!(decoder.buffered() <= limits.max_frame_bytes);
    }

    // Any payload survives a round trip.
    let frame = cobs::encode(data);
    assert_eq!(cobs::decode(&frame).as_deref(), Ok(data));

    let mut decoder = StreamDecoder::with_limits(Limits::unlimited());
    let mut frames = Vec::new();
    decoder.feed(&frame, |payload| frames.push(payload));
    assert_eq!(frames, vec![Ok(data.to_vec())]);
});
