//! Shared measurement value types.
//!
//! Both measurement paths - Schroeder decay analysis of a raw impulse
//! response and parsing of a vendor audit log - converge on
//! [`Rt60Measurement`], which the evaluation and reporting layers consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reverberation-time result for one frequency band.
///
/// `rt60_seconds` is strictly positive by construction; use
/// [`Rt60Measurement::new`] to enforce this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rt60Measurement {
    /// Octave-band center frequency in Hz.
    pub frequency_hz: u32,
    /// Reverberation time in seconds (> 0).
    pub rt60_seconds: f32,
    /// When the measurement was taken.
    pub timestamp: DateTime<Utc>,
}

impl Rt60Measurement {
    /// Create a measurement, rejecting non-positive or non-finite RT60.
    pub fn new(frequency_hz: u32, rt60_seconds: f32, timestamp: DateTime<Utc>) -> Option<Self> {
        if rt60_seconds > 0.0 && rt60_seconds.is_finite() {
            Some(Self {
                frequency_hz,
                rt60_seconds,
                timestamp,
            })
        } else {
            None
        }
    }
}

/// Which decay window produced an RT60 value.
///
/// ISO 3382-1 ties acceptance criteria to the evaluation range: the wider
/// the measured decay window, the more dynamic range and signal-to-noise
/// headroom the recording must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationRange {
    /// 20 dB window (-5 to -25 dB), extrapolated x3.
    T20,
    /// 30 dB window (-5 to -35 dB), extrapolated x2.
    T30,
    /// Full 60 dB decay measured directly.
    T60,
    /// Derived from theory (Sabine), not measured; no level requirements.
    Calculated,
}

/// Minimum dynamic range and SNR a recording must meet for a given
/// evaluation range to count as ISO-compliant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelRequirements {
    /// Minimum decay dynamic range in dB.
    pub min_dynamic_range_db: f32,
    /// Minimum signal-to-noise ratio in dB.
    pub min_snr_db: f32,
}

impl EvaluationRange {
    /// ISO 3382-1 level requirements for this range; `None` for purely
    /// calculated values.
    pub fn requirements(self) -> Option<LevelRequirements> {
        match self {
            EvaluationRange::T20 => Some(LevelRequirements {
                min_dynamic_range_db: 20.0,
                min_snr_db: 35.0,
            }),
            EvaluationRange::T30 => Some(LevelRequirements {
                min_dynamic_range_db: 30.0,
                min_snr_db: 45.0,
            }),
            EvaluationRange::T60 => Some(LevelRequirements {
                min_dynamic_range_db: 60.0,
                min_snr_db: 65.0,
            }),
            EvaluationRange::Calculated => None,
        }
    }
}

/// Overall quality tier of a measurement session.
///
/// Ordered ascending so that comparisons read naturally:
/// `class >= QualityClass::Good` means "defensible".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityClass {
    /// Below every acceptance threshold.
    Poor,
    /// Usable for orientation, not for formal reporting.
    Acceptable,
    /// Meets the ISO acceptance criteria.
    Good,
    /// High-correlation, high-SNR, multi-position measurement.
    Excellent,
}
