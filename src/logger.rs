//! Tracing initialization and stderr reporting: the startup banner,
//! per-notification outcome lines, and the periodic statistics dump.

use crate::config::Config;
use crate::handler::stats::StatsCollector;
use crate::handler::Disposition;
use crate::keymap::{self, keynames::get_key_name};
use crate::util;
use chrono::Local;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber (fmt layer to stderr, env-filter).
pub fn init_tracing(cfg: &Config) {
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(cfg.verbose)
        .with_level(true);

    let filter = EnvFilter::try_new(&cfg.log_filter).unwrap_or_else(|e| {
        eprintln!("Warning: invalid log filter '{}': {e}", cfg.log_filter);
        EnvFilter::new("mi_air_keys=info")
    });

    tracing_subscriber::registry().with(fmt_layer).with(filter).init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git_sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        build_ts = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        guid = keymap::EVENT_GUID,
        "mi-air-keys starting"
    );
    info!(
        log_events = cfg.log_events,
        log_interval = %util::format_duration(cfg.log_interval),
        stats_json = cfg.stats_json,
        log_filter = %cfg.log_filter,
        "configuration loaded"
    );
}

/// Per-notification outcome line. Forwarded and informational codes are
/// logged when opted in via --log-events; unmapped codes stay at debug so
/// normal operation is quiet about them. The malformed-payload warning is
/// raised by the handler itself.
pub fn log_disposition(cfg: &Config, disposition: &Disposition) {
    match *disposition {
        Disposition::Forwarded { raw_code, key } if cfg.log_events => {
            info!(raw_code, key = %get_key_name(key), "pulse forwarded");
        }
        Disposition::Informational(raw_code) if cfg.log_events => {
            let label = keymap::entry(raw_code).map_or("", |e| e.label);
            info!(raw_code, label, "informational code");
        }
        Disposition::Unmapped(raw_code) => {
            debug!(raw_code, "unmapped code dropped");
        }
        _ => {}
    }
}

/// Spawns the periodic statistics dump thread. The thread only reads the
/// shared collector and lives for the process lifetime.
pub fn spawn_periodic_dump(cfg: &Config, stats: Arc<Mutex<StatsCollector>>, started: Instant) {
    if cfg.log_interval.is_zero() {
        return;
    }
    let ticker = crossbeam_channel::tick(cfg.log_interval);
    thread::spawn(move || {
        for _ in ticker.iter() {
            let runtime_us = started.elapsed().as_micros() as u64;
            let stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
            eprintln!(
                "\n--- mi-air-keys status @ {} ---",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            let _ = stats.print_summary(&mut io::stderr(), runtime_us);
        }
    });
}
