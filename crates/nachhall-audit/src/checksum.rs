//! Base-36 integrity checksum over the log's valid T20 values.
//!
//! The device sums the T20 seconds of every valid band, scales by 1000,
//! rounds to the nearest integer, and renders the result in upper-case
//! base 36. Verification recomputes that token and compares
//! case-insensitively. A log without a declared checksum fails closed:
//! absence is never accepted as valid.

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Render a non-negative integer in upper-case base 36.
pub fn to_base36_upper(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("base36 alphabet is ASCII")
}

/// The checksum token expected for a set of valid T20 values.
pub fn expected_token(valid_t20_seconds: &[f64]) -> String {
    let sum: f64 = valid_t20_seconds.iter().sum();
    let scaled = (sum * 1000.0).round().max(0.0) as u64;
    to_base36_upper(scaled)
}

/// Verify a declared checksum token against the valid T20 values.
///
/// Comparison is case-insensitive; `None` (no checksum declared) is
/// always a failure.
pub fn verify(declared: Option<&str>, valid_t20_seconds: &[f64]) -> bool {
    match declared {
        Some(token) => token.eq_ignore_ascii_case(&expected_token(valid_t20_seconds)),
        None => false,
    }
}
