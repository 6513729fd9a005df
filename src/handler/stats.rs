//! Counters over notification dispositions, reported on exit and on the
//! periodic dump, in human-readable or JSON form.

use crate::handler::Disposition;
use crate::keymap::{self, keynames::get_key_name};
use crate::util::format_us;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};

#[derive(Debug, Default)]
pub struct StatsCollector {
    pub notifications: u64,
    pub empty: u64,
    pub malformed: u64,
    pub no_sink: u64,
    pub informational: u64,
    pub unmapped: u64,
    pub forwarded: u64,
    /// Pulses emitted per evdev key code.
    pub per_key_pulses: HashMap<u16, u64>,
    /// Integer payloads seen per raw code, mapped or not.
    pub per_code_counts: HashMap<u64, u64>,
}

/// Per-key row of the JSON report.
#[derive(Debug, Serialize)]
pub struct KeyReport {
    pub key_code: u16,
    pub key_name: String,
    pub pulses: u64,
}

/// Per-raw-code row of the JSON report. `label` is present for codes in
/// the vendor vocabulary.
#[derive(Debug, Serialize)]
pub struct CodeReport {
    pub raw_code: u64,
    pub label: Option<&'static str>,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub report_type: &'static str,
    pub runtime_us: u64,
    pub notifications: u64,
    pub forwarded: u64,
    pub informational: u64,
    pub unmapped: u64,
    pub malformed: u64,
    pub empty: u64,
    pub no_sink: u64,
    pub per_key: Vec<KeyReport>,
    pub per_code: Vec<CodeReport>,
}

impl StatsCollector {
    pub fn record(&mut self, disposition: &Disposition) {
        self.notifications += 1;
        match *disposition {
            Disposition::Empty => self.empty += 1,
            Disposition::Malformed(_) => self.malformed += 1,
            Disposition::NoSink => self.no_sink += 1,
            Disposition::Informational(code) => {
                self.informational += 1;
                *self.per_code_counts.entry(code).or_default() += 1;
            }
            Disposition::Unmapped(code) => {
                self.unmapped += 1;
                *self.per_code_counts.entry(code).or_default() += 1;
            }
            Disposition::Forwarded { raw_code, key } => {
                self.forwarded += 1;
                *self.per_code_counts.entry(raw_code).or_default() += 1;
                *self.per_key_pulses.entry(key).or_default() += 1;
            }
        }
    }

    pub fn report(&self, runtime_us: u64) -> StatsReport {
        let mut per_key: Vec<KeyReport> = self
            .per_key_pulses
            .iter()
            .map(|(&key_code, &pulses)| KeyReport {
                key_code,
                key_name: get_key_name(key_code),
                pulses,
            })
            .collect();
        per_key.sort_by_key(|r| r.key_code);

        let mut per_code: Vec<CodeReport> = self
            .per_code_counts
            .iter()
            .map(|(&raw_code, &count)| CodeReport {
                raw_code,
                label: keymap::entry(raw_code).map(|e| e.label),
                count,
            })
            .collect();
        per_code.sort_by_key(|r| r.raw_code);

        StatsReport {
            report_type: "cumulative",
            runtime_us,
            notifications: self.notifications,
            forwarded: self.forwarded,
            informational: self.informational,
            unmapped: self.unmapped,
            malformed: self.malformed,
            empty: self.empty,
            no_sink: self.no_sink,
            per_key,
            per_code,
        }
    }

    /// Human-readable summary, printed to stderr on exit and on the
    /// periodic dump.
    pub fn print_summary(&self, out: &mut impl Write, runtime_us: u64) -> io::Result<()> {
        writeln!(out, "--- mi-air-keys statistics ---")?;
        writeln!(out, "Notifications Processed: {}", self.notifications)?;
        writeln!(out, "Pulses Forwarded: {}", self.forwarded)?;
        writeln!(out, "Informational Codes: {}", self.informational)?;
        writeln!(out, "Unmapped Codes: {}", self.unmapped)?;
        writeln!(out, "Malformed Payloads: {}", self.malformed)?;
        writeln!(out, "Empty Notifications: {}", self.empty)?;
        writeln!(out, "Sink Not Ready: {}", self.no_sink)?;
        writeln!(out, "Runtime: {}", format_us(runtime_us))?;

        let report = self.report(runtime_us);
        if !report.per_key.is_empty() {
            writeln!(out, "Pulses per key:")?;
            for row in &report.per_key {
                writeln!(out, "  {} ({}): {}", row.key_name, row.key_code, row.pulses)?;
            }
        }
        if !report.per_code.is_empty() {
            writeln!(out, "Notifications per raw code:")?;
            for row in &report.per_code {
                match row.label {
                    Some(label) => writeln!(out, "  {:#x} ({label}): {}", row.raw_code, row.count)?,
                    None => writeln!(out, "  {:#x}: {}", row.raw_code, row.count)?,
                }
            }
        }
        Ok(())
    }

    /// JSON report for machine consumers (`--stats-json`).
    pub fn print_json(&self, out: &mut impl Write, runtime_us: u64) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, &self.report(runtime_us))?;
        writeln!(out)
    }
}
