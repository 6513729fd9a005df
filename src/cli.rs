use clap::Parser;

/// Translates Xiaomi Mi Air WMI hotkey notifications into evdev key events.
/// Reads binary notification records from stdin and writes input_event
/// structs to stdout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Log every decoded notification and its outcome to stderr.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub log_events: bool,

    /// Dump statistics to stderr every N seconds (0 = disabled).
    #[arg(long, default_value = "0", value_name = "SECONDS")]
    pub log_interval: u64,

    /// Print final statistics as JSON instead of human-readable text.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub stats_json: bool,

    /// Print the vendor keymap and interface GUID, then exit.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub list_keymap: bool,

    /// Tracing filter directive for stderr logging.
    #[arg(long, default_value = "mi_air_keys=info", value_name = "FILTER")]
    pub log_filter: String,

    /// Include tracing targets in log output.
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

/// Parses command line arguments using clap.
pub fn parse_args() -> Args {
    Args::parse()
}
