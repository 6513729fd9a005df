//! The registered input device: where translated key pulses go.

use crate::event::{self, write_event};
use input_linux_sys::KEY_MAX;
use std::io::{self, Write};
use thiserror::Error;

/// Something that can receive a single logical key activation.
pub trait KeySink {
    /// Emit one press-then-release pulse for `key`. Two calls with the same
    /// key are two independent pulses, never a held state.
    fn emit_pulse(&mut self, key: u16) -> io::Result<()>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("declared key vocabulary is empty")]
    EmptyVocabulary,
    #[error("key code {0} is above KEY_MAX")]
    KeyOutOfRange(u16),
}

/// Production sink: writes `input_event` structs to a byte stream (stdout
/// in pipe mode), holding the vocabulary declared at registration.
#[derive(Debug)]
pub struct EventWriter<W> {
    writer: W,
    keybits: Vec<u16>,
}

impl<W: Write> EventWriter<W> {
    /// Declares the key vocabulary and takes ownership of the output
    /// stream. On error nothing is registered and the writer is dropped,
    /// so no partially-initialized sink is ever observable.
    pub fn register(writer: W, keys: &[u16]) -> Result<Self, RegisterError> {
        if keys.is_empty() {
            return Err(RegisterError::EmptyVocabulary);
        }
        let mut keybits = keys.to_vec();
        keybits.sort_unstable();
        keybits.dedup();
        if let Some(&bad) = keybits.iter().find(|&&k| i32::from(k) > KEY_MAX) {
            return Err(RegisterError::KeyOutOfRange(bad));
        }
        Ok(EventWriter { writer, keybits })
    }

    /// Whether `key` is part of the declared vocabulary.
    pub fn supports(&self, key: u16) -> bool {
        self.keybits.binary_search(&key).is_ok()
    }

    #[cfg(test)]
    pub(crate) fn writer_ref(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> KeySink for EventWriter<W> {
    fn emit_pulse(&mut self, key: u16) -> io::Result<()> {
        debug_assert!(self.supports(key), "pulse for undeclared key {key}");
        let time = event::now();
        write_event(&mut self.writer, &event::key_event(time, key, 1))?;
        write_event(&mut self.writer, &event::syn_event(time))?;
        write_event(&mut self.writer, &event::key_event(time, key, 0))?;
        write_event(&mut self.writer, &event::syn_event(time))?;
        // Hotkeys are latency-sensitive; don't sit in the stream buffer.
        self.writer.flush()
    }
}
