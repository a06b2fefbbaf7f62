//! Structured audit record emitted by the log parser.
//!
//! Field names are the wire contract of the JSON audit output; the
//! reporting layer consumes them verbatim.

use chrono::{DateTime, Utc};
use nachhall_core::Rt60Measurement;
use serde::{Deserialize, Serialize};

/// Provenance of one parsed log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMetadata {
    /// Name of the log file the record was parsed from.
    pub source_file: String,
    /// RFC 3339 timestamp of the parse.
    pub timestamp_iso: String,
    /// Device identifier from the log's setup section.
    pub device: String,
    /// Exporting app version from the log's setup section.
    pub app_version: String,
}

/// One frequency band extracted from the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditBand {
    /// Band center frequency in Hz.
    pub freq_hz: u32,
    /// T20 reverberation time in seconds; `None` when the device logged
    /// the no-data sentinel.
    pub t20_s: Option<f64>,
    /// Decay-fit correlation in percent; `None` when absent.
    pub corr_percent: Option<f64>,
    /// True when the band has a T20 value and a correlation of at least
    /// 95%.
    pub valid: bool,
    /// Why the band is invalid (`"no data"`, `"low correlation"`,
    /// comma-joined); empty for valid bands.
    pub note: String,
}

/// Aggregate health of the parsed log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Whether the declared checksum matches the recomputed one. False
    /// when the log declared none.
    pub checksum_ok: bool,
    /// Number of valid bands.
    pub valid_band_count: usize,
    /// Mean T20 over valid bands; `None` when no band is valid.
    pub mean_t20_s_valid: Option<f64>,
}

/// Complete audit record for one parsed log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditModel {
    /// Provenance of the log.
    pub metadata: AuditMetadata,
    /// Extracted bands, ascending frequency.
    pub bands: Vec<AuditBand>,
    /// Aggregate health flags.
    pub summary: AuditSummary,
}

impl AuditModel {
    /// Compact JSON rendering of the record.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Pretty-printed JSON rendering of the record.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Convert the valid bands into [`Rt60Measurement`]s so the log path
    /// feeds the same evaluation pipeline as raw decay analysis.
    pub fn to_measurements(&self, timestamp: DateTime<Utc>) -> Vec<Rt60Measurement> {
        self.bands
            .iter()
            .filter(|b| b.valid)
            .filter_map(|b| {
                let t20 = b.t20_s?;
                Rt60Measurement::new(b.freq_hz, t20 as f32, timestamp)
            })
            .collect()
    }
}
