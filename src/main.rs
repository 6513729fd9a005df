// Main application entry point.
// Binds the translator to the stdin/stdout pipe, wires signal handling,
// and reports statistics on exit.

use signal_hook::consts::signal::{SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::Signals;
use std::io::{self, Write};
use std::process::exit;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::error;

use mi_air_keys::cli;
use mi_air_keys::config::Config;
use mi_air_keys::event::read_notification;
use mi_air_keys::handler::stats::StatsCollector;
use mi_air_keys::handler::DeviceContext;
use mi_air_keys::keymap::{self, keynames::get_key_name, KeyAction};
use mi_air_keys::logger;
use mi_air_keys::sink::EventWriter;

/// `--list-keymap`: dump the vendor vocabulary and exit.
fn print_keymap() {
    println!("WMI event GUID: {}", keymap::EVENT_GUID);
    println!("{:<10} {:<22} meaning", "raw code", "key");
    for entry in keymap::KEYMAP {
        let key = match entry.action {
            KeyAction::Key(code) => format!("{} ({code})", get_key_name(code)),
            KeyAction::None => "-".to_string(),
        };
        println!("{:<10} {key:<22} {}", format!("{:#x}", entry.raw_code), entry.label);
    }
}

fn print_final_stats(cfg: &Config, stats: &StatsCollector, runtime_us: u64) {
    let mut stderr = io::stderr().lock();
    let result = if cfg.stats_json {
        stats.print_json(&mut stderr, runtime_us)
    } else {
        stats.print_summary(&mut stderr, runtime_us)
    };
    let _ = result.and_then(|()| stderr.flush());
}

fn main() -> io::Result<()> {
    let args = cli::parse_args();

    if args.list_keymap {
        print_keymap();
        return Ok(());
    }

    let cfg = Config::from(&args);
    logger::init_tracing(&cfg);

    // Probe phase: validate the table and register the sink before the
    // first notification is accepted. Any failure here is fatal and
    // leaves nothing half-initialized behind.
    if let Err(e) = keymap::validate() {
        error!(error = %e, "keymap validation failed");
        exit(2);
    }
    let sink = match EventWriter::register(io::stdout().lock(), &keymap::emitted_keys()) {
        Ok(sink) => sink,
        Err(e) => {
            error!(error = %e, "unable to register input sink");
            exit(2);
        }
    };
    let mut ctx = DeviceContext::new(sink);

    let stats = Arc::new(Mutex::new(StatsCollector::default()));
    let started = Instant::now();
    let final_stats_printed = Arc::new(AtomicBool::new(false));

    logger::spawn_periodic_dump(&cfg, Arc::clone(&stats), started);

    // Signal thread: print final stats once, then exit with the
    // conventional 128+signal code.
    let mut signals = Signals::new([SIGTERM, SIGINT, SIGQUIT])?;
    {
        let stats = Arc::clone(&stats);
        let printed = Arc::clone(&final_stats_printed);
        let cfg = cfg.clone();
        std::thread::spawn(move || {
            if let Some(sig) = signals.forever().next() {
                if !printed.swap(true, Ordering::SeqCst) {
                    let runtime_us = started.elapsed().as_micros() as u64;
                    let stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
                    print_final_stats(&cfg, &stats, runtime_us);
                }
                exit(128 + sig);
            }
        });
    }

    // Main notification loop: one record in, at most one pulse out.
    let mut stdin = io::stdin().lock();
    loop {
        let notification = match read_notification(&mut stdin) {
            Ok(Some(notification)) => notification,
            // EOF: the notification channel closed upstream.
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "error reading notification record");
                exit(3);
            }
        };

        match ctx.handle_notification(notification.payload()) {
            Ok(disposition) => {
                stats
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .record(&disposition);
                logger::log_disposition(&cfg, &disposition);
            }
            Err(e) => {
                error!(error = %e, "error writing key events");
                exit(4);
            }
        }
    }

    if !final_stats_printed.swap(true, Ordering::SeqCst) {
        let runtime_us = started.elapsed().as_micros() as u64;
        let stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
        print_final_stats(&cfg, &stats, runtime_us);
    }

    Ok(())
}
