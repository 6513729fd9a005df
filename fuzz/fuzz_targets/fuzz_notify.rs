#![no_main]

use libfuzzer_sys::fuzz_target;
use mi_air_keys::event::{Notification, NOTIFICATION_SIZE};
use mi_air_keys::handler::DeviceContext;
use mi_air_keys::keymap;
use mi_air_keys::sink::EventWriter;
use std::io;

// Bound the number of records per case to keep individual runs short.
const MAX_RECORDS_PER_CASE: usize = 1000;

fuzz_target!(|data: &[u8]| {
    // Treat the input as a stream of notification records, the same way
    // the binary consumes stdin. The goal is to find panics in the
    // decode + dispatch path, not in the sink.
    let sink = match EventWriter::register(io::sink(), &keymap::emitted_keys()) {
        Ok(sink) => sink,
        Err(_) => return,
    };
    let mut ctx = DeviceContext::new(sink);

    for chunk in data
        .chunks_exact(NOTIFICATION_SIZE)
        .take(MAX_RECORDS_PER_CASE)
    {
        let mut buf = [0u8; NOTIFICATION_SIZE];
        buf.copy_from_slice(chunk);
        let notification = Notification::decode(&buf);
        let _ = ctx.handle_notification(notification.payload());
    }
});
