//! Unit tests for the guard chain, the sink, and the stats counters.

use crate::event::RawEvent;
use crate::handler::stats::StatsCollector;
use crate::handler::{DeviceContext, Disposition};
use crate::keymap;
use crate::sink::{EventWriter, KeySink, RegisterError};
use input_linux_sys::{EV_KEY, EV_SYN, KEY_PROG1};
use std::io;
use std::mem::size_of;

/// Minimal recording sink for in-crate tests.
#[derive(Debug, Default)]
struct RecordingSink {
    pulses: Vec<u16>,
}

impl KeySink for RecordingSink {
    fn emit_pulse(&mut self, key: u16) -> io::Result<()> {
        self.pulses.push(key);
        Ok(())
    }
}

fn bound_ctx() -> DeviceContext<RecordingSink> {
    DeviceContext::new(RecordingSink::default())
}

// --- Guard chain ---

#[test]
fn empty_payload_is_a_noop() {
    let mut ctx = bound_ctx();
    let d = ctx.handle_notification(None).unwrap();
    assert_eq!(d, Disposition::Empty);
    assert!(ctx.sink().unwrap().pulses.is_empty());
}

#[test]
fn non_integer_payload_is_dropped() {
    let mut ctx = bound_ctx();
    let d = ctx.handle_notification(Some(RawEvent::Other(0x02))).unwrap();
    assert_eq!(d, Disposition::Malformed(0x02));
    assert!(ctx.sink().unwrap().pulses.is_empty());
}

#[test]
fn unbound_context_drops_even_mapped_codes() {
    // The sink-presence guard runs before the lookup, so a mapped code
    // against an unbound context reports NoSink, not Unmapped.
    let mut ctx = DeviceContext::<RecordingSink>::unbound();
    let d = ctx.handle_notification(Some(RawEvent::Integer(0x7))).unwrap();
    assert_eq!(d, Disposition::NoSink);
}

#[test]
fn type_guard_runs_before_sink_guard() {
    let mut ctx = DeviceContext::<RecordingSink>::unbound();
    let d = ctx.handle_notification(Some(RawEvent::Other(0x04))).unwrap();
    assert_eq!(d, Disposition::Malformed(0x04));
}

#[test]
fn sink_write_failure_surfaces_as_io_error() {
    struct DeadSink;
    impl KeySink for DeadSink {
        fn emit_pulse(&mut self, _key: u16) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }
    let mut ctx = DeviceContext::new(DeadSink);
    let err = ctx
        .handle_notification(Some(RawEvent::Integer(0x7)))
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    // Guarded outcomes never touch the sink, so they still succeed.
    let d = ctx.handle_notification(Some(RawEvent::Integer(0x1))).unwrap();
    assert_eq!(d, Disposition::Informational(0x1));
}

// --- EventWriter ---

#[test]
fn registration_rejects_empty_vocabulary() {
    let err = EventWriter::register(Vec::<u8>::new(), &[]).unwrap_err();
    assert_eq!(err, RegisterError::EmptyVocabulary);
}

#[test]
fn registration_rejects_out_of_range_key() {
    let err = EventWriter::register(Vec::<u8>::new(), &[u16::MAX]).unwrap_err();
    assert_eq!(err, RegisterError::KeyOutOfRange(u16::MAX));
}

#[test]
fn registered_writer_knows_its_vocabulary() {
    let writer = EventWriter::register(Vec::<u8>::new(), &keymap::emitted_keys()).unwrap();
    assert!(writer.supports(KEY_PROG1 as u16));
    assert!(!writer.supports(0));
}

#[test]
fn pulse_is_press_syn_release_syn() {
    let mut writer = EventWriter::register(Vec::<u8>::new(), &[KEY_PROG1 as u16]).unwrap();
    writer.emit_pulse(KEY_PROG1 as u16).unwrap();
    let bytes = writer.writer_ref().as_slice();

    let ev_size = size_of::<input_linux_sys::input_event>();
    assert_eq!(bytes.len(), 4 * ev_size);

    // type_/code/value sit in the trailing 8 bytes of each event.
    let type_off = ev_size - 8;
    let triple = |i: usize| {
        let chunk = &bytes[i * ev_size..(i + 1) * ev_size];
        (
            u16::from_le_bytes([chunk[type_off], chunk[type_off + 1]]),
            u16::from_le_bytes([chunk[type_off + 2], chunk[type_off + 3]]),
            i32::from_le_bytes([
                chunk[type_off + 4],
                chunk[type_off + 5],
                chunk[type_off + 6],
                chunk[type_off + 7],
            ]),
        )
    };
    assert_eq!(triple(0), (EV_KEY as u16, KEY_PROG1 as u16, 1));
    assert_eq!(triple(1).0, EV_SYN as u16);
    assert_eq!(triple(2), (EV_KEY as u16, KEY_PROG1 as u16, 0));
    assert_eq!(triple(3).0, EV_SYN as u16);
}

// --- StatsCollector ---

#[test]
fn stats_count_each_disposition() {
    let mut stats = StatsCollector::default();
    stats.record(&Disposition::Forwarded { raw_code: 0x7, key: KEY_PROG1 as u16 });
    stats.record(&Disposition::Forwarded { raw_code: 0x7, key: KEY_PROG1 as u16 });
    stats.record(&Disposition::Informational(0x1));
    stats.record(&Disposition::Unmapped(0x63));
    stats.record(&Disposition::Malformed(0x2));
    stats.record(&Disposition::Empty);
    stats.record(&Disposition::NoSink);

    assert_eq!(stats.notifications, 7);
    assert_eq!(stats.forwarded, 2);
    assert_eq!(stats.informational, 1);
    assert_eq!(stats.unmapped, 1);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.empty, 1);
    assert_eq!(stats.no_sink, 1);
    assert_eq!(stats.per_key_pulses[&(KEY_PROG1 as u16)], 2);
    assert_eq!(stats.per_code_counts[&0x7], 2);
    assert_eq!(stats.per_code_counts[&0x63], 1);
}

#[test]
fn stats_report_rows_are_sorted_and_labeled() {
    let mut stats = StatsCollector::default();
    stats.record(&Disposition::Unmapped(0x63));
    stats.record(&Disposition::Informational(0x1));
    let report = stats.report(1_000);
    assert_eq!(report.report_type, "cumulative");
    assert_eq!(report.per_code.len(), 2);
    assert_eq!(report.per_code[0].raw_code, 0x1);
    assert_eq!(report.per_code[0].label, Some("fn lock on"));
    assert_eq!(report.per_code[1].raw_code, 0x63);
    assert_eq!(report.per_code[1].label, None);
}
