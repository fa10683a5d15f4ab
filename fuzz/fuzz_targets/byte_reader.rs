#![no_main]

use libfuzzer_sys::fuzz_target;
use scalar::{ByteReader, ScalarValue};

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut steps = 0usize;

    // Self-describing stream: a type tag followed by a value of that type.
    while !reader.is_empty() && steps < 1024 {
        steps += 1;
        let before = reader.position();
        let Ok(kind) = reader.read_kind() else {
            let _ = reader.read_u8();
            continue;
        };
        match ScalarValue::read(kind, &mut reader) {
            Ok(value) => {
                assert_eq!(value.kind(), kind);
                assert_eq!(value.encode().len(), value.encoded_len());
                assert!(reader.position() > before);
            }
            Err(_) => break,
        }
    }
});
