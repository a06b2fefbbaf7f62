//! Nachhall Audit - structured parsing of vendor measurement logs
//!
//! External measurement devices export a fixed-format text audit log with
//! per-band T20 values, fit correlations, and a base-36 checksum. This
//! crate extracts that data into a structured, serializable record:
//!
//! - [`parser`] - line-oriented section state machine
//! - [`checksum`] - base-36 integrity token computation and verification
//! - [`model`] - the [`AuditModel`] output record and its JSON form
//!
//! The parser is deliberately tolerant: malformed lines are skipped, never
//! fatal. Log health is judged by the caller through
//! `summary.checksum_ok` and `summary.valid_band_count`. A missing
//! checksum fails closed - absence is never treated as valid.
//!
//! # Example
//!
//! ```rust
//! use nachhall_audit::parser::parse;
//!
//! let log = "Setup:\n\
//!            Device=XL2\n\
//!            T20:\n\
//!            500Hz 0.62\n\
//!            Correltn:\n\
//!            500Hz 98\n\
//!            Checksum=H8\n";
//!
//! let audit = parse(log, "room-a.txt");
//! assert_eq!(audit.summary.valid_band_count, 1);
//! assert!(audit.summary.checksum_ok);
//! ```

pub mod checksum;
pub mod model;
pub mod parser;

pub use model::{AuditBand, AuditMetadata, AuditModel, AuditSummary};
pub use parser::{parse, parse_at};
