//! Nachhall Core - numeric guardrails and shared measurement types
//!
//! Foundation crate for the nachhall room-acoustics workspace. It carries the
//! pieces every other crate needs:
//!
//! - [`math`] - NaN/Inf-safe numeric primitives (log, divide, sqrt, clamping)
//!   used by all decay and uncertainty computation
//! - [`measurement`] - [`Rt60Measurement`], [`EvaluationRange`], and
//!   [`QualityClass`] value types shared by the analysis, evaluation, and
//!   audit-log paths
//! - [`calibration`] - [`CalibrationRecord`] with validity windows and
//!   per-band sensitivity corrections
//!
//! All types are immutable value types: created by pure computation, never
//! mutated after construction, never owning external resources.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use nachhall_core::{Rt60Measurement, power_db};
//!
//! let m = Rt60Measurement::new(500, 0.62, Utc::now()).unwrap();
//! assert_eq!(m.frequency_hz, 500);
//!
//! // power_db never produces NaN or -inf, even for zero energy
//! assert!(power_db(0.0).is_finite());
//! ```

pub mod calibration;
pub mod math;
pub mod measurement;

pub use calibration::CalibrationRecord;
pub use math::{clamp_unit, mean, power_db, safe_div, safe_log10, safe_sqrt, sample_std_dev};
pub use measurement::{EvaluationRange, LevelRequirements, QualityClass, Rt60Measurement};
