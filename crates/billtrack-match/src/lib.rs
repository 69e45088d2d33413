//! Resource tracking matcher.
//!
//! Assigns each Azure billing row a single uppercase tracking label from a
//! prioritized dictionary of case-insensitive substring patterns, and records
//! an audit trail for rows where more than one identifier field matched.
//!
//! ```
//! use billtrack_match::TrackingMatcher;
//! use billtrack_model::{BillingRow, MatchPattern, PatternSet};
//!
//! let patterns = PatternSet::new(vec![MatchPattern::new("Forensics", "Forensics", 1)]).unwrap();
//! let matcher = TrackingMatcher::new(&patterns).unwrap();
//! let report = matcher.match_rows(&[BillingRow::new("/x/disk-1").with_resource_group("Forensics")]);
//! assert_eq!(report.labels, vec![Some("FORENSICS".to_string())]);
//! assert!(report.audit.is_empty());
//! ```

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
mod patterns;
pub mod utils;

pub use engine::{DEFAULT_CHUNK_SIZE, FieldMatch, MatchOptions, TrackingMatcher, match_rows};
pub use error::MatchError;
pub use utils::{fold_text, output_label};
