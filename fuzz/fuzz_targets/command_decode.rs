#![no_main]

use libfuzzer_sys::fuzz_target;
use protocol::{command_from_bytes, command_from_frame, CommandReceiver, Scene};

fuzz_target!(|data: &[u8]| {
    // A decoded command survives re-encoding.
    if let Ok(command) = command_from_bytes(data) {
        let encoded = command.encode();
        assert_eq!(command_from_bytes(&encoded), Ok(command));
    }

    let _ = command_from_frame(data);

    let mut receiver = CommandReceiver::new();
    let mut scene = Scene::new();
    let stats = receiver.receive(data, &mut scene);
    assert!(stats.applied + stats.dropped() + stats.empty == stats.frames);
});
