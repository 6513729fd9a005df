//! Behavior tests for the notification handler against a recording sink.

use input_linux_sys::{KEY_PROG1, KEY_PROG2, KEY_TOUCHPAD_OFF, KEY_TOUCHPAD_ON};
use mi_air_keys::event::RawEvent;
use mi_air_keys::handler::{DeviceContext, Disposition};

// Use the dev-dependency crate for helpers
use test_helpers::*;

fn bound_ctx() -> DeviceContext<MockSink> {
    DeviceContext::new(MockSink::default())
}

fn feed(ctx: &mut DeviceContext<MockSink>, codes: &[u64]) -> Vec<Disposition> {
    codes
        .iter()
        .map(|&code| {
            ctx.handle_notification(Some(RawEvent::Integer(code)))
                .expect("mock sink never fails")
        })
        .collect()
}

// --- Mapped codes ---

#[test]
fn each_mapped_code_forwards_exactly_one_pulse() {
    let cases = [
        (CODE_TOUCHPAD_ON, KEY_TOUCHPAD_ON as u16),
        (CODE_TOUCHPAD_OFF, KEY_TOUCHPAD_OFF as u16),
        (CODE_PROG1, KEY_PROG1 as u16),
        (CODE_PROG2, KEY_PROG2 as u16),
    ];
    for (raw_code, key) in cases {
        let mut ctx = bound_ctx();
        let dispositions = feed(&mut ctx, &[raw_code]);
        assert_eq!(dispositions, vec![Disposition::Forwarded { raw_code, key }]);
        assert_eq!(ctx.sink().unwrap().pulses, vec![key], "raw code {raw_code:#x}");
    }
}

// --- Informational codes ---

#[test]
fn informational_codes_forward_nothing() {
    let mut ctx = bound_ctx();
    let dispositions = feed(
        &mut ctx,
        &[CODE_FN_LOCK_ON, CODE_FN_LOCK_OFF, CODE_CAPSLOCK_ON, CODE_CAPSLOCK_OFF],
    );
    assert!(dispositions
        .iter()
        .all(|d| matches!(d, Disposition::Informational(_))));
    assert!(ctx.sink().unwrap().pulses.is_empty());
}

// --- Unknown codes ---

#[test]
fn unknown_codes_are_silently_dropped() {
    let mut ctx = bound_ctx();
    let dispositions = feed(&mut ctx, &[0, 9, 255, u64::MAX]);
    assert_eq!(
        dispositions,
        vec![
            Disposition::Unmapped(0),
            Disposition::Unmapped(9),
            Disposition::Unmapped(255),
            Disposition::Unmapped(u64::MAX),
        ]
    );
    assert!(ctx.sink().unwrap().pulses.is_empty());
}

// --- Malformed / absent events ---

#[test]
fn malformed_event_leaves_no_residual_state() {
    let mut ctx = bound_ctx();
    let d = ctx
        .handle_notification(Some(RawEvent::Other(0x03)))
        .unwrap();
    assert_eq!(d, Disposition::Malformed(0x03));
    // A well-formed event right after still forwards normally.
    let d = ctx
        .handle_notification(Some(RawEvent::Integer(CODE_PROG1)))
        .unwrap();
    assert_eq!(
        d,
        Disposition::Forwarded { raw_code: CODE_PROG1, key: KEY_PROG1 as u16 }
    );
    assert_eq!(ctx.sink().unwrap().pulses, vec![KEY_PROG1 as u16]);
}

#[test]
fn absent_event_is_a_noop() {
    let mut ctx = bound_ctx();
    assert_eq!(ctx.handle_notification(None).unwrap(), Disposition::Empty);
    assert!(ctx.sink().unwrap().pulses.is_empty());
}

#[test]
fn uninitialized_context_is_a_noop() {
    let mut ctx = DeviceContext::<MockSink>::unbound();
    let d = ctx
        .handle_notification(Some(RawEvent::Integer(CODE_TOUCHPAD_ON)))
        .unwrap();
    assert_eq!(d, Disposition::NoSink);
}

// --- Repeatability ---

#[test]
fn repeated_code_produces_independent_pulses() {
    // N pulses for N notifications: no coalescing, no toggle-hold state.
    let mut ctx = bound_ctx();
    let n = 5;
    feed(&mut ctx, &vec![CODE_TOUCHPAD_ON; n]);
    assert_eq!(ctx.sink().unwrap().pulses, vec![KEY_TOUCHPAD_ON as u16; n]);
}

// --- Scenario from the vendor documentation ---

#[test]
fn mixed_sequence_forwards_three_pulses_in_order() {
    let mut ctx = bound_ctx();
    feed(&mut ctx, &[0x7, 0x1, 0x3, 99, 0x8]);
    assert_eq!(
        ctx.sink().unwrap().pulses,
        vec![KEY_PROG1 as u16, KEY_TOUCHPAD_ON as u16, KEY_PROG2 as u16]
    );
}
