//! Error types for matcher construction.

use thiserror::Error;

/// Errors from building a [`crate::TrackingMatcher`].
///
/// Matching itself never fails; only the search structure can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchError {
    /// The multi-pattern automaton could not be built (e.g. size limits).
    #[error("failed to build search automaton over {terms} terms: {message}")]
    Automaton { terms: usize, message: String },
}
