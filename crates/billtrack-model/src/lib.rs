//! Data model for resource tracking of Azure billing rows.
//!
//! - [`BillingRow`] and [`MatchField`]: the record being labelled and its candidate fields
//! - [`MatchPattern`] and [`PatternSet`]: the operator-maintained tracking dictionary
//! - [`MatchOutcome`], [`AuditRecord`], [`MatchReport`]: what the matcher produces

pub mod audit;
pub mod error;
pub mod lookup;
pub mod pattern;
pub mod row;

pub use audit::{AuditRecord, MatchOutcome, MatchReport, MatchSummary};
pub use error::PatternError;
pub use lookup::CaseInsensitiveSet;
pub use pattern::{DEFAULT_PRIORITY, MatchPattern, PatternRank, PatternSet};
pub use row::{BillingRow, MatchField, last_path_segment};
