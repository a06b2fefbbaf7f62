//! NaN/Inf-safe numeric primitives.
//!
//! Decay curves routinely hit exact zeros (digital silence) and uncertainty
//! math divides by counts that may be zero for degenerate inputs. Every
//! function here has a defined, finite result for any finite input, so the
//! callers never have to re-check for NaN or infinities downstream.

/// Smallest energy considered distinguishable from silence.
///
/// Used as the floor inside [`safe_log10`] so that exact zeros map to a
/// large-but-finite negative dB value instead of `-inf`.
pub const ENERGY_FLOOR: f32 = f32::MIN_POSITIVE;

/// Base-10 logarithm clamped away from zero.
///
/// Returns `log10(max(x, ENERGY_FLOOR))`; never NaN or `-inf` for finite
/// non-negative input.
#[inline]
pub fn safe_log10(x: f32) -> f32 {
    x.max(ENERGY_FLOOR).log10()
}

/// Convert a linear power quantity to decibels: `10 * log10(x)`.
///
/// Zero and negative inputs clamp to the energy floor, so the result is
/// always finite.
///
/// # Example
/// ```rust
/// use nachhall_core::power_db;
///
/// assert!((power_db(1.0) - 0.0).abs() < 1e-6);
/// assert!((power_db(0.1) - (-10.0)).abs() < 1e-4);
/// assert!(power_db(0.0).is_finite());
/// ```
#[inline]
pub fn power_db(x: f32) -> f32 {
    10.0 * safe_log10(x)
}

/// Division that returns 0.0 instead of NaN/Inf for zero or non-finite
/// denominators.
#[inline]
pub fn safe_div(numerator: f32, denominator: f32) -> f32 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

/// Square root that returns 0.0 for negative input.
///
/// Rounding can push variance sums a hair below zero; this keeps the
/// resulting standard deviation real.
#[inline]
pub fn safe_sqrt(x: f32) -> f32 {
    if x <= 0.0 { 0.0 } else { x.sqrt() }
}

/// Clamp to the unit interval; NaN maps to 0.0.
#[inline]
pub fn clamp_unit(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Sample standard deviation (n - 1 denominator); 0.0 for fewer than two
/// values.
pub fn sample_std_dev(values: &[f32]) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f32 = values.iter().map(|v| (v - m) * (v - m)).sum();
    safe_sqrt(sum_sq / (values.len() - 1) as f32)
}
