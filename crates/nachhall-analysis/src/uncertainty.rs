//! Metrological uncertainty computation (GUM type A, combined).

use nachhall_core::{safe_div, safe_sqrt, sample_std_dev};

/// Type-A standard uncertainty: the standard deviation of the mean of
/// repeated measurements, `s / sqrt(n)`.
///
/// Returns 0.0 for fewer than two values - a single measurement has no
/// statistical spread estimate by this method, which is not an error.
pub fn type_a_uncertainty(values: &[f32]) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }
    sample_std_dev(values) / (values.len() as f32).sqrt()
}

/// Combined standard uncertainty of independent components:
/// root sum of squares.
pub fn combined_uncertainty(components: &[f32]) -> f32 {
    safe_sqrt(components.iter().map(|c| c * c).sum())
}

/// Coefficient of determination (r²) of the linear regression of `y` on
/// `x`.
///
/// This is the squared-Pearson convention for regression reporting, distinct
/// from the absolute-r convention of
/// [`crate::decay::segment_correlation`]. Returns 0.0 for mismatched or
/// too-short inputs and for zero variance.
pub fn coefficient_of_determination(x: &[f32], y: &[f32]) -> f32 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }

    let n = x.len() as f32;
    let mut sum_x = 0.0f32;
    let mut sum_y = 0.0f32;
    let mut sum_xy = 0.0f32;
    let mut sum_xx = 0.0f32;
    let mut sum_yy = 0.0f32;

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_xx += xi * xi;
        sum_yy += yi * yi;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = (n * sum_xx - sum_x * sum_x) * (n * sum_yy - sum_y * sum_y);

    let r2 = safe_div(numerator * numerator, denominator);
    r2.clamp(0.0, 1.0)
}
