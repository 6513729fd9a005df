//! Common helper functions for tests and benchmarks.

use input_linux_sys::input_event;
use mi_air_keys::event::{ACPI_TYPE_INTEGER, NOTIFICATION_SIZE};
use mi_air_keys::sink::KeySink;
use std::io;
use std::mem::size_of;

// --- Constants ---

/// Raw codes from the vendor vocabulary, named for readability in tests.
pub const CODE_FN_LOCK_ON: u64 = 0x1;
pub const CODE_FN_LOCK_OFF: u64 = 0x2;
pub const CODE_TOUCHPAD_ON: u64 = 0x3;
pub const CODE_TOUCHPAD_OFF: u64 = 0x4;
pub const CODE_CAPSLOCK_ON: u64 = 0x5;
pub const CODE_CAPSLOCK_OFF: u64 = 0x6;
pub const CODE_PROG1: u64 = 0x7;
pub const CODE_PROG2: u64 = 0x8;

// --- Record Creation Helpers ---

/// Encodes one notification record the way the firmware channel delivers
/// it: u32 object type, four reserved bytes, u64 value, little-endian.
pub fn notification_bytes(obj_type: u32, value: u64) -> [u8; NOTIFICATION_SIZE] {
    let mut buf = [0u8; NOTIFICATION_SIZE];
    buf[0..4].copy_from_slice(&obj_type.to_le_bytes());
    buf[8..16].copy_from_slice(&value.to_le_bytes());
    buf
}

/// An integer-typed notification record for `value`.
pub fn integer_notification(value: u64) -> [u8; NOTIFICATION_SIZE] {
    notification_bytes(ACPI_TYPE_INTEGER, value)
}

/// Concatenates records into one stdin stream.
pub fn records_to_bytes(records: &[[u8; NOTIFICATION_SIZE]]) -> Vec<u8> {
    records.concat()
}

// --- Sinks ---

/// Sink that records pulses instead of writing events.
#[derive(Debug, Default)]
pub struct MockSink {
    pub pulses: Vec<u16>,
}

impl KeySink for MockSink {
    fn emit_pulse(&mut self, key: u16) -> io::Result<()> {
        self.pulses.push(key);
        Ok(())
    }
}

// --- Output Parsing ---

/// Decodes an output byte stream back into (type, code, value) triples,
/// ignoring the timestamps. Panics if the stream is not a whole number of
/// input_event structs.
pub fn parse_output_events(bytes: &[u8]) -> Vec<(u16, u16, i32)> {
    let ev_size = size_of::<input_event>();
    assert_eq!(
        bytes.len() % ev_size,
        0,
        "output is not a whole number of input_events"
    );
    bytes
        .chunks_exact(ev_size)
        .map(|chunk| {
            // type_/code/value sit in the trailing 8 bytes of each event,
            // after the platform-sized timeval.
            let base = ev_size - 8;
            let type_ = u16::from_le_bytes([chunk[base], chunk[base + 1]]);
            let code = u16::from_le_bytes([chunk[base + 2], chunk[base + 3]]);
            let value = i32::from_le_bytes([
                chunk[base + 4],
                chunk[base + 5],
                chunk[base + 6],
                chunk[base + 7],
            ]);
            (type_, code, value)
        })
        .collect()
}
