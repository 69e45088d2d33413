//! Tracking patterns and validated pattern sets.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// Priority assigned to dictionary entries that do not state one.
pub const DEFAULT_PRIORITY: i64 = 1;

/// An operator-configured `(search term, replacement label, priority)` rule.
///
/// Lower `priority` values win when several patterns match the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPattern {
    pub search_term: String,
    pub replacement_label: String,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

impl MatchPattern {
    pub fn new(
        search_term: impl Into<String>,
        replacement_label: impl Into<String>,
        priority: i64,
    ) -> Self {
        Self {
            search_term: search_term.into(),
            replacement_label: replacement_label.into(),
            priority,
        }
    }
}

/// Effective ranking key of a pattern: priority first, then list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternRank {
    pub priority: i64,
    pub index: usize,
}

impl Ord for PatternRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for PatternRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An ordered, validated collection of [`MatchPattern`]s.
///
/// List order is preserved because it breaks priority ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<MatchPattern>,
}

impl PatternSet {
    /// Validates the supplied patterns.
    ///
    /// Search terms are kept verbatim, whitespace included. Labels are
    /// trimmed.
    ///
    /// # Errors
    ///
    /// Returns the first pattern with an empty search term or a blank
    /// replacement label.
    pub fn new(patterns: Vec<MatchPattern>) -> Result<Self, PatternError> {
        let mut validated = Vec::with_capacity(patterns.len());
        for (index, pattern) in patterns.into_iter().enumerate() {
            let search_term = pattern.search_term;
            if search_term.is_empty() {
                return Err(PatternError::EmptySearchTerm { index });
            }
            let replacement_label = pattern.replacement_label.trim();
            if replacement_label.is_empty() {
                return Err(PatternError::EmptyReplacementLabel {
                    index,
                    search_term,
                });
            }
            validated.push(MatchPattern {
                search_term,
                replacement_label: replacement_label.to_string(),
                priority: pattern.priority,
            });
        }
        Ok(Self {
            patterns: validated,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MatchPattern> {
        self.patterns.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchPattern> {
        self.patterns.iter()
    }

    pub fn as_slice(&self) -> &[MatchPattern] {
        &self.patterns
    }

    /// Pattern indices sorted by effective rank (priority, then list order).
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.patterns.len()).collect();
        indices.sort_by_key(|&index| PatternRank {
            priority: self.patterns[index].priority,
            index,
        });
        indices
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a MatchPattern;
    type IntoIter = std::slice::Iter<'a, MatchPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<MatchPattern>> for PatternSet {
    type Error = PatternError;

    fn try_from(patterns: Vec<MatchPattern>) -> Result<Self, Self::Error> {
        Self::new(patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_search_term() {
        let err = PatternSet::new(vec![
            MatchPattern::new("vm", "VM", 1),
            MatchPattern::new("   ", "BLANK", 1),
        ])
        .unwrap_err();
        assert_eq!(err, PatternError::EmptySearchTerm { index: 1 });
        assert_eq!(err.index(), 1);
    }

    #[test]
    fn rejects_empty_replacement_label() {
        let err = PatternSet::new(vec![MatchPattern::new("vm", "", 1)]).unwrap_err();
        assert!(matches!(
            err,
            PatternError::EmptyReplacementLabel { index: 0, .. }
        ));
    }

    #[test]
    fn keeps_terms_verbatim_and_trims_labels() {
        let set = PatternSet::new(vec![
            MatchPattern::new(" prd", " Production\t", 3),
            MatchPattern::new("#legacy", "Legacy", 1),
        ])
        .unwrap();
        let pattern = set.get(0).unwrap();
        assert_eq!(pattern.search_term, " prd");
        assert_eq!(pattern.replacement_label, "Production");
        assert_eq!(pattern.priority, 3);
        assert_eq!(set.get(1).unwrap().search_term, "#legacy");
    }

    #[test]
    fn empty_set_is_valid() {
        let set = PatternSet::new(Vec::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set, PatternSet::empty());
    }

    #[test]
    fn ranked_indices_order_by_priority_then_position() {
        let set = PatternSet::new(vec![
            MatchPattern::new("a", "A", 2),
            MatchPattern::new("b", "B", 1),
            MatchPattern::new("c", "C", 2),
            MatchPattern::new("d", "D", -1),
        ])
        .unwrap();
        assert_eq!(set.ranked_indices(), vec![3, 1, 0, 2]);
    }

    #[test]
    fn missing_priority_deserializes_to_default() {
        let pattern: MatchPattern =
            serde_json::from_str(r#"{"search_term":"x","replacement_label":"X"}"#).unwrap();
        assert_eq!(pattern.priority, DEFAULT_PRIORITY);
    }
}
