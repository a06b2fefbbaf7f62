//! ISO 3382-1 measurement quality and defensibility classification.

use chrono::{DateTime, Utc};
use nachhall_core::{CalibrationRecord, EvaluationRange, QualityClass};
use serde::{Deserialize, Serialize};

/// Quality metrics of one RT60 measurement session.
///
/// The correlation coefficient here is the absolute Pearson r of the decay
/// fit ([`crate::decay::segment_correlation`]), not the r² convention used
/// for regression reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementQuality {
    /// Decay-fit correlation, 0 to 1.
    pub correlation_coefficient: f32,
    /// Standard uncertainty in seconds.
    pub uncertainty_seconds: f32,
    /// Signal-to-noise ratio in dB.
    pub snr_db: f32,
    /// Measured decay dynamic range in dB.
    pub dynamic_range_db: f32,
    /// Number of microphone positions averaged.
    pub position_count: u32,
    /// Which decay window produced the value.
    pub evaluation_range: EvaluationRange,
}

impl MeasurementQuality {
    /// Expanded uncertainty at k = 2 coverage (roughly 95% confidence).
    pub fn expanded_uncertainty(&self) -> f32 {
        self.uncertainty_seconds * 2.0
    }

    /// Whether the measurement meets the ISO 3382-1 acceptance criteria:
    /// fit correlation >= 0.95 and the evaluation range's dynamic-range and
    /// SNR minima. Calculated values impose no level requirements.
    pub fn is_iso_compliant(&self) -> bool {
        if self.correlation_coefficient < 0.95 {
            return false;
        }
        match self.evaluation_range.requirements() {
            Some(req) => {
                self.snr_db >= req.min_snr_db
                    && self.dynamic_range_db >= req.min_dynamic_range_db
            }
            None => true,
        }
    }

    /// Quality tier, evaluated strictly in order: the first satisfied tier
    /// wins.
    pub fn quality_class(&self) -> QualityClass {
        if self.correlation_coefficient >= 0.99 && self.snr_db >= 50.0 && self.position_count >= 3
        {
            QualityClass::Excellent
        } else if self.is_iso_compliant() {
            QualityClass::Good
        } else if self.correlation_coefficient >= 0.90 {
            QualityClass::Acceptable
        } else {
            QualityClass::Poor
        }
    }
}

/// Whether a session's results can carry a legally defensible label:
/// quality class Good or better and a calibration valid at `now`.
pub fn is_legally_defensible(
    quality: &MeasurementQuality,
    calibration: &CalibrationRecord,
    now: DateTime<Utc>,
) -> bool {
    quality.quality_class() >= QualityClass::Good && calibration.is_valid_at(now)
}
