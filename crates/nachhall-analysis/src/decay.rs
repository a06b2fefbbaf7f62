//! Energy decay analysis via Schroeder backward integration.
//!
//! The impulse response is squared and reverse-cumulative-summed, giving the
//! energy remaining from time t to the end of the recording. The normalized
//! curve starts at 1.0 (0 dB); RT60 is extrapolated from the T30 or T20
//! decay window of the dB curve.
//!
//! Level crossings use a clamped index search, not interpolation, so the
//! time resolution of every result is one sample period.

use nachhall_core::{EvaluationRange, power_db, safe_sqrt};
use thiserror::Error;

/// Errors from decay analysis input validation.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum DecayError {
    /// The impulse response contained no samples.
    #[error("impulse response is empty")]
    EmptyInput,

    /// The impulse response is too short to integrate.
    #[error("impulse response needs at least 2 samples, got {0}")]
    InsufficientData(usize),

    /// The sample rate was zero, negative, or non-finite.
    #[error("sample rate must be positive, got {0} Hz")]
    InvalidSampleRate(f32),

    /// Neither the T30 nor the T20 window was achievable.
    #[error("no valid decay window in the response")]
    NoValidDecay,
}

/// Normalized Schroeder energy decay curve.
///
/// `values[0]` is 1.0 unless the response had zero or negative peak energy,
/// in which case the curve is returned unnormalized and `degenerate` is set.
/// Degenerate curves carry no usable decay information; callers must not
/// derive RT60 from them.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyDecayCurve {
    /// Linear energy values, chronological order, same length as the input.
    pub values: Vec<f32>,
    /// True when the signal had no positive energy to normalize by.
    pub degenerate: bool,
}

/// RT60 value plus the decay window that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayEstimate {
    /// Reverberation time in seconds.
    pub rt60_seconds: f32,
    /// [`EvaluationRange::T30`] or [`EvaluationRange::T20`].
    pub range: EvaluationRange,
}

/// Compute the normalized energy decay curve of an impulse response.
///
/// Squares every sample, reverse-cumulative-sums (energy remaining from t to
/// the end), restores chronological order, and normalizes by the first
/// (maximum) value.
pub fn energy_decay_curve(ir: &[f32]) -> Result<EnergyDecayCurve, DecayError> {
    if ir.is_empty() {
        return Err(DecayError::EmptyInput);
    }
    if ir.len() < 2 {
        return Err(DecayError::InsufficientData(ir.len()));
    }

    let mut values = Vec::with_capacity(ir.len());
    let mut sum = 0.0f32;
    for &sample in ir.iter().rev() {
        sum += sample * sample;
        values.push(sum);
    }
    values.reverse();

    let total = values[0];
    if total <= 0.0 {
        tracing::warn!(total_energy = total, "degenerate signal, curve left unnormalized");
        return Ok(EnergyDecayCurve {
            values,
            degenerate: true,
        });
    }

    for v in &mut values {
        *v /= total;
    }
    Ok(EnergyDecayCurve {
        values,
        degenerate: false,
    })
}

/// Map a linear energy curve to decibels: `10 * log10(max(v, eps))`.
///
/// The floor guarantees finite output for every finite non-negative input,
/// including exact zeros.
pub fn decibel_curve(edc: &[f32]) -> Vec<f32> {
    edc.iter().map(|&v| power_db(v)).collect()
}

/// First index where the dB curve has fallen to or below `level_db`.
///
/// `None` when the curve never reaches that level.
pub fn index_of_level(db_curve: &[f32], level_db: f32) -> Option<usize> {
    db_curve.iter().position(|&v| v <= level_db)
}

/// Elapsed seconds between two level crossings; `None` when either level is
/// unreached or the window is non-positive.
fn window_seconds(db_curve: &[f32], from_db: f32, to_db: f32, sample_rate: f32) -> Option<f32> {
    let start = index_of_level(db_curve, from_db)?;
    let end = index_of_level(db_curve, to_db)?;
    if end > start {
        Some((end - start) as f32 / sample_rate)
    } else {
        None
    }
}

/// T20: decay time over the -5 to -25 dB window, extrapolated x3 to 60 dB.
pub fn t20(db_curve: &[f32], sample_rate: f32) -> Option<f32> {
    window_seconds(db_curve, -5.0, -25.0, sample_rate).map(|t| t * 3.0)
}

/// T30: decay time over the -5 to -35 dB window, extrapolated x2 to 60 dB.
pub fn t30(db_curve: &[f32], sample_rate: f32) -> Option<f32> {
    window_seconds(db_curve, -5.0, -35.0, sample_rate).map(|t| t * 2.0)
}

/// Estimate RT60 from a raw impulse response.
///
/// T30 is tried first: the wider window makes the fit statistically more
/// reliable when the recording has the dynamic range for it. T20 is the
/// fallback; if neither window is achievable the result is
/// [`DecayError::NoValidDecay`].
pub fn rt60(ir: &[f32], sample_rate: f32) -> Result<DecayEstimate, DecayError> {
    if sample_rate <= 0.0 || !sample_rate.is_finite() {
        return Err(DecayError::InvalidSampleRate(sample_rate));
    }

    let edc = energy_decay_curve(ir)?;
    let db = decibel_curve(&edc.values);

    if let Some(t) = t30(&db, sample_rate) {
        return Ok(DecayEstimate {
            rt60_seconds: t,
            range: EvaluationRange::T30,
        });
    }
    if let Some(t) = t20(&db, sample_rate) {
        return Ok(DecayEstimate {
            rt60_seconds: t,
            range: EvaluationRange::T20,
        });
    }
    Err(DecayError::NoValidDecay)
}

/// Absolute Pearson correlation of the index-vs-dB regression over
/// `db_curve[start..=end]`.
///
/// This is the ISO fit-quality metric: 1.0 means the decay is perfectly
/// linear in dB. Returns 0.0 for degenerate index ranges or zero variance.
pub fn segment_correlation(db_curve: &[f32], start: usize, end: usize) -> f32 {
    if start >= end || end >= db_curve.len() {
        return 0.0;
    }

    let n = (end - start + 1) as f32;
    let mut sum_x = 0.0f32;
    let mut sum_y = 0.0f32;
    let mut sum_xy = 0.0f32;
    let mut sum_xx = 0.0f32;
    let mut sum_yy = 0.0f32;

    for (i, &y) in db_curve[start..=end].iter().enumerate() {
        let x = i as f32;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
        sum_yy += y * y;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = safe_sqrt((n * sum_xx - sum_x * sum_x) * (n * sum_yy - sum_y * sum_y));

    if denominator > 0.0 {
        (numerator / denominator).abs().min(1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Exponential amplitude decay with the given RT60.
    fn exponential_ir(rt60_seconds: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
        // 60 dB of energy decay: amplitude falls as exp(-6.9078 t / RT60)
        let rate = 6.9078 / rt60_seconds;
        (0..num_samples)
            .map(|i| (-(i as f32 / sample_rate) * rate).exp())
            .collect()
    }

    #[test]
    fn edc_rejects_empty_input() {
        assert_eq!(energy_decay_curve(&[]), Err(DecayError::EmptyInput));
    }

    #[test]
    fn edc_rejects_single_sample() {
        assert_eq!(
            energy_decay_curve(&[1.0]),
            Err(DecayError::InsufficientData(1))
        );
    }

    #[test]
    fn edc_starts_at_one_and_is_non_increasing() {
        let ir = exponential_ir(0.5, 48000.0, 24000);
        let edc = energy_decay_curve(&ir).unwrap();

        assert!(!edc.degenerate);
        assert_relative_eq!(edc.values[0], 1.0);
        for pair in edc.values.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-6);
        }
    }

    #[test]
    fn edc_all_zero_signal_is_degenerate() {
        let edc = energy_decay_curve(&[0.0; 16]).unwrap();
        assert!(edc.degenerate);
        assert!(edc.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn decibel_curve_finite_for_zeros() {
        let db = decibel_curve(&[1.0, 0.5, 0.0, 0.0]);
        assert!(db.iter().all(|v| v.is_finite()));
        assert_relative_eq!(db[0], 0.0);
        assert_relative_eq!(db[1], -3.0103, epsilon = 1e-3);
    }

    #[test]
    fn index_of_level_first_crossing() {
        let db = [0.0, -2.0, -6.0, -10.0];
        assert_eq!(index_of_level(&db, -5.0), Some(2));
        assert_eq!(index_of_level(&db, -20.0), None);
    }

    #[test]
    fn t20_needs_both_crossings() {
        // Ramp only reaches -26 dB: T20 available, T30 not.
        let db: Vec<f32> = (0..27).map(|i| -(i as f32)).collect();
        let t = t20(&db, 1.0).unwrap();
        // -5 at index 5, -25 at index 25: 20 samples, x3
        assert_relative_eq!(t, 60.0);
        assert_eq!(t30(&db, 1.0), None);
    }

    #[test]
    fn t20_unavailable_when_window_non_positive() {
        // Curve starts below both levels: both crossings at index 0.
        let db = [-30.0, -31.0, -32.0];
        assert_eq!(t20(&db, 48000.0), None);
    }

    #[test]
    fn rt60_rejects_bad_sample_rate() {
        let ir = exponential_ir(0.5, 48000.0, 1024);
        assert!(matches!(
            rt60(&ir, 0.0),
            Err(DecayError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            rt60(&ir, -44100.0),
            Err(DecayError::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn rt60_matches_synthetic_decay_within_5_percent() {
        let sample_rate = 48000.0;
        let ir = exponential_ir(1.0, sample_rate, 96000);
        let estimate = rt60(&ir, sample_rate).unwrap();

        assert_eq!(estimate.range, EvaluationRange::T30);
        assert_relative_eq!(estimate.rt60_seconds, 1.0, max_relative = 0.05);
    }

    #[test]
    fn rt60_falls_back_to_t20_on_short_dynamic_range() {
        // Geometric decay of ~3.1 dB per sample over 10 samples: the dB
        // curve bottoms out near -31 dB, so T30 is unreachable.
        let ir: Vec<f32> = (0..10).map(|i| 0.7f32.powi(i)).collect();
        let estimate = rt60(&ir, 10.0).unwrap();
        assert_eq!(estimate.range, EvaluationRange::T20);
        assert!(estimate.rt60_seconds > 0.0);
    }

    #[test]
    fn rt60_unavailable_without_5_db_of_decay() {
        // Constant signal: EDC falls linearly with remaining sample count,
        // far too slowly to cross -5 dB before the very end.
        let ir = [1.0f32; 3];
        assert_eq!(rt60(&ir, 48000.0), Err(DecayError::NoValidDecay));
    }

    #[test]
    fn segment_correlation_perfect_line() {
        let db: Vec<f32> = (0..50).map(|i| -0.5 * i as f32).collect();
        let r = segment_correlation(&db, 5, 45);
        assert_relative_eq!(r, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn segment_correlation_degenerate_cases() {
        let db = [0.0, -1.0, -2.0];
        assert_eq!(segment_correlation(&db, 2, 1), 0.0);
        assert_eq!(segment_correlation(&db, 0, 10), 0.0);
        // zero variance
        let flat = [-10.0f32; 8];
        assert_eq!(segment_correlation(&flat, 0, 7), 0.0);
    }
}
