//! Microphone calibration records.
//!
//! A measurement chain is only legally defensible while its calibration is
//! current. The record carries the calibration date, a validity period, the
//! microphone sensitivity, and per-band level corrections.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Calibration state of the measurement microphone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    /// When the chain was last calibrated.
    pub calibration_date: DateTime<Utc>,
    /// How long the calibration stays valid, in days.
    pub validity_days: i64,
    /// Microphone sensitivity in mV/Pa.
    pub sensitivity_mv_per_pa: f32,
    /// Per-band level corrections in dB, keyed by frequency in Hz.
    pub frequency_corrections_db: BTreeMap<u32, f32>,
}

impl CalibrationRecord {
    /// Create a record with no frequency corrections.
    pub fn new(
        calibration_date: DateTime<Utc>,
        validity_days: i64,
        sensitivity_mv_per_pa: f32,
    ) -> Self {
        Self {
            calibration_date,
            validity_days,
            sensitivity_mv_per_pa,
            frequency_corrections_db: BTreeMap::new(),
        }
    }

    /// The instant the calibration expires.
    pub fn expiration_date(&self) -> DateTime<Utc> {
        self.calibration_date + Duration::days(self.validity_days)
    }

    /// Whether the calibration is valid at the given instant
    /// (strictly before expiration).
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expiration_date()
    }

    /// Whether the calibration is valid right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Correction for an exact band, if one was recorded.
    pub fn correction_db(&self, frequency_hz: u32) -> Option<f32> {
        self.frequency_corrections_db.get(&frequency_hz).copied()
    }

    /// Apply the band correction to a level; levels for bands without a
    /// recorded correction pass through unchanged.
    pub fn apply_correction(&self, frequency_hz: u32, level_db: f32) -> f32 {
        level_db + self.correction_db(frequency_hz).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> CalibrationRecord {
        let date = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        CalibrationRecord::new(date, 365, 50.0)
    }

    #[test]
    fn expiration_is_date_plus_validity() {
        let r = record();
        let expected = Utc.with_ymd_and_hms(2027, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(r.expiration_date(), expected);
    }

    #[test]
    fn valid_strictly_before_expiration() {
        let r = record();
        let just_before = r.expiration_date() - Duration::seconds(1);
        assert!(r.is_valid_at(just_before));
        assert!(!r.is_valid_at(r.expiration_date()));
        assert!(!r.is_valid_at(r.expiration_date() + Duration::days(1)));
    }

    #[test]
    fn correction_applied_on_exact_band_only() {
        let mut r = record();
        r.frequency_corrections_db.insert(1000, -0.4);

        assert_eq!(r.correction_db(1000), Some(-0.4));
        assert_eq!(r.correction_db(500), None);
        assert!((r.apply_correction(1000, 60.0) - 59.6).abs() < 1e-6);
        assert_eq!(r.apply_correction(500, 60.0), 60.0);
    }
}
