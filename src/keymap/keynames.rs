static KEY_NAMES: phf::Map<u16, &'static str> = phf::phf_map! {
    148u16 => "KEY_PROG1",
    149u16 => "KEY_PROG2",
    531u16 => "KEY_TOUCHPAD_ON",
    532u16 => "KEY_TOUCHPAD_OFF",
};

/// Resolves an evdev key code to its symbolic name. Codes outside this
/// device's vocabulary fall back to a numeric form.
pub fn get_key_name(code: u16) -> String {
    match KEY_NAMES.get(&code) {
        Some(name) => (*name).to_string(),
        None => format!("KEY_{code}"),
    }
}
