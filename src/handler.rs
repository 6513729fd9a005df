//! The notification handler: one guarded, stateless-per-call transition
//! from a decoded firmware notification to (at most) one key pulse.

pub mod stats;

#[cfg(test)]
mod tests;

use crate::event::RawEvent;
use crate::keymap::{self, KeyAction};
use crate::sink::KeySink;
use std::io;
use tracing::warn;

/// Named outcome of one notification. Every guard in the chain maps to its
/// own variant; none of them is an error. Steady-state handling fails open
/// and drops the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Notification arrived without a payload object.
    Empty,
    /// Payload was not an integer; the discriminant is kept for the log.
    Malformed(u32),
    /// No input sink is bound yet.
    NoSink,
    /// Recognized code that intentionally forwards nothing.
    Informational(u64),
    /// Code absent from the keymap; expected during normal operation.
    Unmapped(u64),
    /// A key pulse went out.
    Forwarded { raw_code: u64, key: u16 },
}

/// Per-instance state: exactly one firmware interface instance, owning
/// exactly one input sink for its whole lifetime.
#[derive(Debug)]
pub struct DeviceContext<S> {
    sink: Option<S>,
}

impl<S: KeySink> DeviceContext<S> {
    pub fn new(sink: S) -> Self {
        DeviceContext { sink: Some(sink) }
    }

    /// A context whose sink registration has not happened (or failed).
    /// Notifications against it are dropped by the sink-presence guard.
    pub fn unbound() -> Self {
        DeviceContext { sink: None }
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Handles one firmware notification. Independent of every previous
    /// call; the only `Err` is a sink write failure, which belongs to the
    /// transport, not to any guard.
    pub fn handle_notification(&mut self, payload: Option<RawEvent>) -> io::Result<Disposition> {
        let event = match payload {
            Some(event) => event,
            None => return Ok(Disposition::Empty),
        };

        let raw_code = match event {
            RawEvent::Integer(value) => value,
            RawEvent::Other(obj_type) => {
                warn!(obj_type, "unsupported notification payload type");
                return Ok(Disposition::Malformed(obj_type));
            }
        };

        let sink = match self.sink.as_mut() {
            Some(sink) => sink,
            None => return Ok(Disposition::NoSink),
        };

        match keymap::lookup(raw_code) {
            Some(KeyAction::Key(key)) => {
                sink.emit_pulse(key)?;
                Ok(Disposition::Forwarded { raw_code, key })
            }
            Some(KeyAction::None) => Ok(Disposition::Informational(raw_code)),
            None => Ok(Disposition::Unmapped(raw_code)),
        }
    }
}
