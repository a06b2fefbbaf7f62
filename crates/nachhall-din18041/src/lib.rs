//! Nachhall DIN 18041 - regulatory reverberation-time targets and
//! compliance evaluation
//!
//! DIN 18041 prescribes target reverberation times per room use and volume.
//! This crate derives per-octave-band targets for six room categories and
//! classifies measured RT60 values against them:
//!
//! - [`targets`] - the per-category profile table and volume-scaled target
//!   computation
//! - [`evaluate`] - per-band deviation status and whole-session compliance
//!
//! # Example
//!
//! ```rust
//! use nachhall_din18041::{RoomType, evaluate::evaluate_band, targets::target};
//! use nachhall_din18041::evaluate::DeviationStatus;
//!
//! let t = target(RoomType::Classroom, 100.0, 500).unwrap();
//! assert!((t.target_rt60 - 0.6).abs() < 1e-6);
//!
//! assert_eq!(evaluate_band(0.65, &t), DeviationStatus::WithinTolerance);
//! assert_eq!(evaluate_band(0.75, &t), DeviationStatus::TooHigh);
//! ```
//!
//! Everything here is a pure function of its inputs; the profile table is
//! compiled-in data, not branching code, so adding a category means adding
//! one record.

pub mod evaluate;
pub mod targets;

pub use evaluate::{
    DeviationStatus, Rt60Deviation, SessionCompliance, evaluate_band, evaluate_room,
    session_compliance,
};
pub use targets::{
    Din18041Target, OCTAVE_BANDS_HZ, RoomProfile, RoomType, TargetError, target, targets,
};
