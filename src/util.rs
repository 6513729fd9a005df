//! Small formatting helpers shared by the log and stats paths.

use std::time::Duration;

/// Renders a microsecond count at a scale a human can read.
pub fn format_us(us: u64) -> String {
    match us {
        0..=999 => format!("{us} µs"),
        1_000..=999_999 => format!("{:.1} ms", us as f64 / 1_000.0),
        _ => format!("{:.3} s", us as f64 / 1_000_000.0),
    }
}

/// Human-readable rendering of a `Duration` via `humantime`.
pub fn format_duration(d: Duration) -> String {
    humantime::format_duration(d).to_string()
}
