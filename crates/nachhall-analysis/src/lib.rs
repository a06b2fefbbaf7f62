//! Nachhall Analysis - reverberation-time estimation and measurement quality
//!
//! This crate turns a raw room impulse response into a judged RT60 value:
//!
//! - [`decay`] - Schroeder backward integration, dB conversion, and T20/T30
//!   slope extraction
//! - [`quality`] - ISO 3382-1 acceptance criteria and quality tiers
//! - [`uncertainty`] - type-A and combined metrological uncertainty
//!
//! # Example
//!
//! ```rust
//! use nachhall_analysis::decay;
//! use nachhall_core::EvaluationRange;
//!
//! // Synthetic exponential decay, RT60 = 1 s at 48 kHz
//! let sample_rate = 48000.0;
//! let ir: Vec<f32> = (0..96000)
//!     .map(|i| (-(i as f32 / sample_rate) * 6.9078).exp())
//!     .collect();
//!
//! let estimate = decay::rt60(&ir, sample_rate).unwrap();
//! assert_eq!(estimate.range, EvaluationRange::T30);
//! assert!((estimate.rt60_seconds - 1.0).abs() < 0.05);
//! ```
//!
//! Two correlation conventions live side by side on purpose:
//! [`decay::segment_correlation`] returns the absolute Pearson r used as the
//! ISO fit-quality metric, while [`uncertainty::coefficient_of_determination`]
//! returns r² for regression reporting. Call sites depend on the specific
//! convention, so they are not unified.

pub mod decay;
pub mod quality;
pub mod uncertainty;

pub use decay::{DecayError, DecayEstimate, EnergyDecayCurve};
pub use quality::{MeasurementQuality, is_legally_defensible};
pub use uncertainty::{coefficient_of_determination, combined_uncertainty, type_a_uncertainty};
