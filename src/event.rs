//! Wire formats on both sides of the translator: the firmware notification
//! record arriving on stdin and the `input_event` structs leaving on stdout.

use input_linux_sys::{input_event, timeval, EV_KEY, EV_SYN};
use std::io::{self, Read, Write};
use std::mem::size_of;

/// Size of one notification record on the wire.
pub const NOTIFICATION_SIZE: usize = 16;

/// ACPI object type discriminants the firmware channel can deliver.
/// `ANY` marks a notification that arrived without a payload object.
pub const ACPI_TYPE_ANY: u32 = 0x00;
pub const ACPI_TYPE_INTEGER: u32 = 0x01;

/// One firmware notification as delivered on the channel: a 32-bit object
/// type discriminant, four reserved bytes, and the 64-bit payload,
/// little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub obj_type: u32,
    pub value: u64,
}

/// Decoded notification payload. The value is only meaningful for
/// `Integer`; `Other` keeps the discriminant for the diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Integer(u64),
    Other(u32),
}

impl Notification {
    pub fn decode(buf: &[u8; NOTIFICATION_SIZE]) -> Self {
        let obj_type = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let mut value = [0u8; 8];
        value.copy_from_slice(&buf[8..16]);
        Notification {
            obj_type,
            value: u64::from_le_bytes(value),
        }
    }

    /// The payload object, or `None` when the notification carried none.
    pub fn payload(&self) -> Option<RawEvent> {
        match self.obj_type {
            ACPI_TYPE_ANY => None,
            ACPI_TYPE_INTEGER => Some(RawEvent::Integer(self.value)),
            other => Some(RawEvent::Other(other)),
        }
    }
}

/// Reads a single notification record from the reader. Returns Ok(None) on
/// EOF, including a truncated trailing record when the channel closes.
pub fn read_notification(reader: &mut impl Read) -> io::Result<Option<Notification>> {
    let mut buf = [0u8; NOTIFICATION_SIZE];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(Some(Notification::decode(&buf))),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

/// Writes a single input_event to the writer.
pub fn write_event(writer: &mut impl Write, event: &input_event) -> io::Result<()> {
    // SAFETY: input_event is a plain C struct; the slice covers exactly one value.
    let buf: &[u8] = unsafe {
        std::slice::from_raw_parts(event as *const input_event as *const u8, size_of::<input_event>())
    };
    writer.write_all(buf)
}

/// Wallclock timestamp for synthesized events, kernel-style.
pub fn now() -> timeval {
    let mut tv = libc::timeval {
        tv_sec: 0,
        tv_usec: 0,
    };
    // SAFETY: gettimeofday only writes into the struct we hand it.
    unsafe { libc::gettimeofday(&mut tv, std::ptr::null_mut()) };
    timeval {
        tv_sec: tv.tv_sec,
        tv_usec: tv.tv_usec,
    }
}

#[inline]
pub fn key_event(time: timeval, code: u16, value: i32) -> input_event {
    input_event {
        time,
        type_: EV_KEY as u16,
        code,
        value,
    }
}

#[inline]
pub fn syn_event(time: timeval) -> input_event {
    input_event {
        time,
        type_: EV_SYN as u16,
        code: 0, // SYN_REPORT
        value: 0,
    }
}
