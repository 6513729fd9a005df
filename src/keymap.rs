//! The fixed vendor vocabulary: which firmware event codes exist and what
//! each one means in evdev terms.

pub mod keynames;

use input_linux_sys::{KEY_PROG1, KEY_PROG2, KEY_TOUCHPAD_OFF, KEY_TOUCHPAD_ON};
use thiserror::Error;

/// WMI event GUID the firmware raises hotkey notifications on. Bit-exact
/// identifier of the interface this tool understands; whatever feeds the
/// pipe matches against it.
pub const EVENT_GUID: &str = "ABBC0F74-8EA1-11D1-00A0-C90629100000";

/// What a recognized raw code translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The firmware emits this code but no key event is forwarded.
    None,
    /// Forward a press-then-release pulse for this evdev key code.
    Key(u16),
}

/// One row of the vendor keymap. The label carries the firmware meaning of
/// the code and shows up in `--list-keymap` output and event logs.
#[derive(Debug, Clone, Copy)]
pub struct KeymapEntry {
    pub raw_code: u64,
    pub action: KeyAction,
    pub label: &'static str,
}

/// The authoritative table. Duplicate on/off codes are spelled out per
/// entry; the table never infers toggling.
pub static KEYMAP: &[KeymapEntry] = &[
    KeymapEntry { raw_code: 0x1, action: KeyAction::None, label: "fn lock on" },
    KeymapEntry { raw_code: 0x2, action: KeyAction::None, label: "fn lock off" },
    KeymapEntry { raw_code: 0x3, action: KeyAction::Key(KEY_TOUCHPAD_ON as u16), label: "fn + space" },
    KeymapEntry { raw_code: 0x4, action: KeyAction::Key(KEY_TOUCHPAD_OFF as u16), label: "fn + space" },
    KeymapEntry { raw_code: 0x5, action: KeyAction::None, label: "capslock on" },
    KeymapEntry { raw_code: 0x6, action: KeyAction::None, label: "capslock off" },
    KeymapEntry { raw_code: 0x7, action: KeyAction::Key(KEY_PROG1 as u16), label: "double fn" },
    KeymapEntry { raw_code: 0x8, action: KeyAction::Key(KEY_PROG2 as u16), label: "fn + f7" },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeymapError {
    #[error("duplicate raw code {0:#x} in keymap")]
    DuplicateRawCode(u64),
}

/// Finds the table row for a raw code. The table is single-digit sized, so
/// a linear scan is the whole lookup.
pub fn entry(raw_code: u64) -> Option<&'static KeymapEntry> {
    KEYMAP.iter().find(|e| e.raw_code == raw_code)
}

pub fn lookup(raw_code: u64) -> Option<KeyAction> {
    entry(raw_code).map(|e| e.action)
}

/// Raw-code uniqueness check. Run once at startup; a duplicate would make
/// lookup results depend on table order.
pub fn validate() -> Result<(), KeymapError> {
    for (i, e) in KEYMAP.iter().enumerate() {
        if KEYMAP[..i].iter().any(|prev| prev.raw_code == e.raw_code) {
            return Err(KeymapError::DuplicateRawCode(e.raw_code));
        }
    }
    Ok(())
}

/// The sorted, deduplicated set of key codes this device can emit: the
/// vocabulary declared to the input sink at registration.
pub fn emitted_keys() -> Vec<u16> {
    let mut keys: Vec<u16> = KEYMAP
        .iter()
        .filter_map(|e| match e.action {
            KeyAction::Key(code) => Some(code),
            KeyAction::None => None,
        })
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}
