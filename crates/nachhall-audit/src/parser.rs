//! Line-oriented state machine over the vendor log format.
//!
//! ```text
//! Setup:
//! AppVersion=2.4.1
//! Date=2026-03-14
//! Device=XL2
//! T20:
//! 125Hz 0,89
//! 500Hz -.--
//! Correltn:
//! 125Hz 97
//! Checksum=OQ
//! ```
//!
//! A line ending in `:` selects a section; `key=value` lines fill the
//! setup metadata; `<freq>Hz <value>` lines fill the T20 and correlation
//! maps. `Checksum=` lines are captured in any state. Decimal commas are
//! normalized to points, and the `-.--` sentinel means "no data". The
//! parser never fails on malformed input; it skips what it cannot read.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::checksum;
use crate::model::{AuditBand, AuditMetadata, AuditModel, AuditSummary};

/// Correlation percentage a band needs to count as valid.
const MIN_VALID_CORRELATION_PERCENT: f64 = 95.0;

/// No-data sentinel the device writes for unmeasurable bands.
const NO_DATA_SENTINEL: &str = "-.--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    NoSection,
    InSetup,
    InT20,
    InCorrelation,
}

/// Parse a log, stamping the record with the current time.
pub fn parse(text: &str, source_file: &str) -> AuditModel {
    parse_at(text, source_file, Utc::now())
}

/// Parse a log with an explicit record timestamp.
///
/// Pure function of its inputs: identical input yields an identical
/// record, which makes audit output reproducible byte for byte.
pub fn parse_at(text: &str, source_file: &str, timestamp: DateTime<Utc>) -> AuditModel {
    let mut section = Section::NoSection;
    let mut setup: BTreeMap<String, String> = BTreeMap::new();
    let mut t20_map: BTreeMap<u32, Option<f64>> = BTreeMap::new();
    let mut corr_map: BTreeMap<u32, Option<f64>> = BTreeMap::new();
    let mut declared_checksum: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(token) = line.strip_prefix("Checksum=") {
            declared_checksum = Some(token.trim().to_string());
            continue;
        }

        if let Some(name) = line.strip_suffix(':') {
            section = match name {
                "Setup" => Section::InSetup,
                "T20" => Section::InT20,
                "Correltn" => Section::InCorrelation,
                _ => Section::NoSection,
            };
            continue;
        }

        match section {
            Section::InSetup => {
                if let Some((key, value)) = line.split_once('=') {
                    setup.insert(key.trim().to_string(), value.trim().to_string());
                } else {
                    tracing::debug!(line, "skipping malformed setup line");
                }
            }
            Section::InT20 => {
                if let Some((freq, value)) = parse_band_line(line) {
                    t20_map.insert(freq, value);
                }
            }
            Section::InCorrelation => {
                if let Some((freq, value)) = parse_band_line(line) {
                    corr_map.insert(freq, value);
                }
            }
            Section::NoSection => {}
        }
    }

    let bands = build_bands(&t20_map, &corr_map);
    let valid_t20s: Vec<f64> = bands
        .iter()
        .filter(|b| b.valid)
        .filter_map(|b| b.t20_s)
        .collect();

    let checksum_ok = checksum::verify(declared_checksum.as_deref(), &valid_t20s);
    if !checksum_ok {
        tracing::warn!(
            source_file,
            declared = declared_checksum.as_deref().unwrap_or("<absent>"),
            "audit log checksum verification failed"
        );
    }

    let mean_t20_s_valid = if valid_t20s.is_empty() {
        None
    } else {
        Some(valid_t20s.iter().sum::<f64>() / valid_t20s.len() as f64)
    };

    AuditModel {
        metadata: AuditMetadata {
            source_file: source_file.to_string(),
            timestamp_iso: timestamp.to_rfc3339(),
            device: setup.get("Device").cloned().unwrap_or_default(),
            app_version: setup.get("AppVersion").cloned().unwrap_or_default(),
        },
        summary: AuditSummary {
            checksum_ok,
            valid_band_count: valid_t20s.len(),
            mean_t20_s_valid,
        },
        bands,
    }
}

/// Parse a `<freq>Hz <value>` line; `None` when the frequency token is
/// unparsable. The inner `Option` is `None` for the no-data sentinel.
fn parse_band_line(line: &str) -> Option<(u32, Option<f64>)> {
    let (freq_token, value_token) = line.split_once(char::is_whitespace)?;
    let freq: u32 = match freq_token.strip_suffix("Hz").and_then(|f| f.parse().ok()) {
        Some(f) => f,
        None => {
            tracing::debug!(line, "skipping band line with unparsable frequency");
            return None;
        }
    };

    let value_token = value_token.trim();
    if value_token == NO_DATA_SENTINEL {
        return Some((freq, None));
    }

    // Decimal comma and decimal point parse identically
    let normalized = value_token.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) => Some((freq, Some(v))),
        Err(_) => Some((freq, None)),
    }
}

/// Join T20 and correlation maps into bands over the union of their
/// frequencies, ascending.
fn build_bands(
    t20_map: &BTreeMap<u32, Option<f64>>,
    corr_map: &BTreeMap<u32, Option<f64>>,
) -> Vec<AuditBand> {
    let mut freqs: Vec<u32> = t20_map.keys().chain(corr_map.keys()).copied().collect();
    freqs.sort_unstable();
    freqs.dedup();

    freqs
        .into_iter()
        .map(|freq_hz| {
            let t20_s = t20_map.get(&freq_hz).copied().flatten();
            let corr_percent = corr_map.get(&freq_hz).copied().flatten();

            let mut notes = Vec::new();
            if t20_s.is_none() {
                notes.push("no data");
            }
            if corr_percent.is_some_and(|c| c < MIN_VALID_CORRELATION_PERCENT) {
                notes.push("low correlation");
            }

            let valid = t20_s.is_some()
                && corr_percent.is_some_and(|c| c >= MIN_VALID_CORRELATION_PERCENT);

            AuditBand {
                freq_hz,
                t20_s,
                corr_percent,
                valid,
                note: notes.join(", "),
            }
        })
        .collect()
}
