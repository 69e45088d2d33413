use thiserror::Error;

/// Rejections raised while building a [`crate::PatternSet`].
///
/// These surface once, before any billing row is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern #{index} has an empty search term")]
    EmptySearchTerm { index: usize },
    #[error("pattern #{index} ('{search_term}') has an empty replacement label")]
    EmptyReplacementLabel { index: usize, search_term: String },
}

impl PatternError {
    /// Zero-based position of the offending pattern in the supplied list.
    pub fn index(&self) -> usize {
        match self {
            Self::EmptySearchTerm { index } | Self::EmptyReplacementLabel { index, .. } => *index,
        }
    }
}
