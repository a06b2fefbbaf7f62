//! End-to-end tests over the log path: vendor log text to DIN 18041
//! evaluation, converging with the raw measurement path on the shared
//! data shapes.

use chrono::{TimeZone, Utc};
use nachhall_audit::checksum::expected_token;
use nachhall_audit::parser::parse_at;
use nachhall_din18041::{RoomType, SessionCompliance, evaluate_room, session_compliance};
use proptest::prelude::*;

fn ts() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap()
}

/// Render a device log for the given (freq, t20, correlation) triples,
/// with the checksum the device itself would have written.
fn render_log(bands: &[(u32, f64, f64)]) -> String {
    let mut log = String::from("Setup:\nAppVersion=2.4.1\nDevice=NTi XL2\nT20:\n");
    for (freq, t20, _) in bands {
        log.push_str(&format!("{freq}Hz {t20}\n"));
    }
    log.push_str("Correltn:\n");
    for (freq, _, corr) in bands {
        log.push_str(&format!("{freq}Hz {corr}\n"));
    }

    let valid_t20s: Vec<f64> = bands
        .iter()
        .filter(|(_, _, corr)| *corr >= 95.0)
        .map(|(_, t20, _)| *t20)
        .collect();
    log.push_str(&format!("Checksum={}\n", expected_token(&valid_t20s)));
    log
}

#[test]
fn device_log_feeds_the_din_evaluator() {
    // A classroom at the reference volume, measured on all six bands.
    // Low bands are near target, 2 kHz is far too reverberant.
    let log = render_log(&[
        (125, 0.70, 98.0),
        (250, 0.64, 97.0),
        (500, 0.62, 99.0),
        (1000, 0.58, 98.0),
        (2000, 1.20, 96.0),
        (4000, 0.52, 97.0),
    ]);

    let audit = parse_at(&log, "classroom.txt", ts());
    assert!(audit.summary.checksum_ok);
    assert_eq!(audit.summary.valid_band_count, 6);

    let measurements = audit.to_measurements(ts());
    let deviations = evaluate_room(&measurements, RoomType::Classroom, 100.0).unwrap();
    assert_eq!(deviations.len(), 6);

    let bad: Vec<u32> = deviations
        .iter()
        .filter(|d| d.status != nachhall_din18041::DeviationStatus::WithinTolerance)
        .map(|d| d.frequency_hz)
        .collect();
    assert_eq!(bad, vec![2000]);
    assert_eq!(
        session_compliance(&deviations),
        SessionCompliance::PartiallyCompliant
    );
}

#[test]
fn invalid_bands_never_reach_the_evaluator() {
    let log = "\
T20:
125Hz 0.70
250Hz -.--
Correltn:
125Hz 80
250Hz 99
";
    let audit = parse_at(log, "sparse.txt", ts());
    assert_eq!(audit.summary.valid_band_count, 0);
    assert!(audit.to_measurements(ts()).is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The parser never panics and is a pure function of its input:
    /// arbitrary text parses to the same record every time.
    #[test]
    fn parser_total_and_deterministic(text in "\\PC{0,400}") {
        let first = parse_at(&text, "fuzz.txt", ts());
        let second = parse_at(&text, "fuzz.txt", ts());
        prop_assert_eq!(first, second);
    }

    /// A device-written checksum always verifies, and any tampering with
    /// a valid T20 value breaks it.
    #[test]
    fn checksum_round_trip(
        t20_millis in prop::collection::vec(100u32..3000, 1..6),
    ) {
        let bands: Vec<(u32, f64, f64)> = t20_millis
            .iter()
            .enumerate()
            .map(|(i, &ms)| (125 << i, f64::from(ms) / 1000.0, 98.0))
            .collect();

        let log = render_log(&bands);
        let audit = parse_at(&log, "fuzz.txt", ts());
        prop_assert!(audit.summary.checksum_ok);
        prop_assert_eq!(audit.summary.valid_band_count, bands.len());
    }
}
