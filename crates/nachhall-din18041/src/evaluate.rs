//! Compliance classification of measured RT60 against DIN 18041 targets.

use nachhall_core::Rt60Measurement;
use serde::{Deserialize, Serialize};

use crate::targets::{Din18041Target, RoomType, TargetError, target};

/// Where one band's measured RT60 sits relative to its tolerance window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviationStatus {
    /// Within `target ± tolerance`.
    WithinTolerance,
    /// Above `target + tolerance` (too reverberant).
    TooHigh,
    /// Below `target - tolerance` (too dry).
    TooLow,
}

/// Whole-session verdict, aggregated over all evaluated bands.
///
/// Deliberately a separate type from [`DeviationStatus`]: a session verdict
/// ("mostly non-compliant") is not the same statement as a band verdict
/// ("this band is too reverberant").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionCompliance {
    /// Every evaluated band is within tolerance.
    Compliant,
    /// At most half of the evaluated bands are out of tolerance.
    PartiallyCompliant,
    /// More than half of the evaluated bands are out of tolerance.
    NonCompliant,
}

/// One band's measured value against its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rt60Deviation {
    /// Octave-band center frequency in Hz.
    pub frequency_hz: u32,
    /// Measured RT60 in seconds.
    pub measured_rt60: f32,
    /// Target RT60 in seconds.
    pub target_rt60: f32,
    /// Tolerance window in seconds.
    pub tolerance_seconds: f32,
    /// Classification of this band.
    pub status: DeviationStatus,
}

impl Rt60Deviation {
    /// Signed deviation, `measured - target`.
    pub fn deviation(&self) -> f32 {
        self.measured_rt60 - self.target_rt60
    }
}

/// Classify a measured value against one target.
pub fn evaluate_band(measured_rt60: f32, target: &Din18041Target) -> DeviationStatus {
    if measured_rt60 > target.upper_bound() {
        DeviationStatus::TooHigh
    } else if measured_rt60 < target.lower_bound() {
        DeviationStatus::TooLow
    } else {
        DeviationStatus::WithinTolerance
    }
}

/// Evaluate every measurement that has a DIN 18041 target band.
///
/// Measurements at frequencies outside the octave-band set are skipped;
/// an invalid volume is a typed error.
pub fn evaluate_room(
    measurements: &[Rt60Measurement],
    room_type: RoomType,
    volume_m3: f32,
) -> Result<Vec<Rt60Deviation>, TargetError> {
    let mut deviations = Vec::with_capacity(measurements.len());
    for m in measurements {
        let t = match target(room_type, volume_m3, m.frequency_hz) {
            Ok(t) => t,
            Err(TargetError::UnknownBand(_)) => continue,
            Err(e) => return Err(e),
        };
        deviations.push(Rt60Deviation {
            frequency_hz: m.frequency_hz,
            measured_rt60: m.rt60_seconds,
            target_rt60: t.target_rt60,
            tolerance_seconds: t.tolerance_seconds,
            status: evaluate_band(m.rt60_seconds, &t),
        });
    }
    Ok(deviations)
}

/// Aggregate a session: zero out-of-tolerance bands is compliant, up to
/// half is partially compliant, more than half is non-compliant.
pub fn session_compliance(deviations: &[Rt60Deviation]) -> SessionCompliance {
    let out_of_tolerance = deviations
        .iter()
        .filter(|d| d.status != DeviationStatus::WithinTolerance)
        .count();

    if out_of_tolerance == 0 {
        SessionCompliance::Compliant
    } else if out_of_tolerance * 2 <= deviations.len() {
        SessionCompliance::PartiallyCompliant
    } else {
        SessionCompliance::NonCompliant
    }
}
