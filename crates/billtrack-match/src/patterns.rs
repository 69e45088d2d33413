//! Multi-pattern index over the folded search terms of a [`PatternSet`].
//!
//! Patterns sharing a folded search term are collapsed into one automaton
//! entry that remembers the best-ranked pattern for that term. A single
//! overlapping scan of a field value then reports every term it contains.

use std::collections::HashMap;

use aho_corasick::{AhoCorasick, MatchKind};
use billtrack_model::{PatternRank, PatternSet};

use crate::error::MatchError;
use crate::utils::fold_text;

#[derive(Debug, Clone)]
pub(crate) struct TermIndex {
    automaton: Option<AhoCorasick>,
    /// Best-ranked pattern per automaton term, indexed by automaton pattern id.
    best: Vec<PatternRank>,
}

impl TermIndex {
    pub(crate) fn build(patterns: &PatternSet) -> Result<Self, MatchError> {
        let mut terms: Vec<String> = Vec::new();
        let mut best: Vec<PatternRank> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for (index, pattern) in patterns.iter().enumerate() {
            let rank = PatternRank {
                priority: pattern.priority,
                index,
            };
            let folded = fold_text(&pattern.search_term);
            match slots.get(&folded) {
                Some(&slot) => {
                    if rank < best[slot] {
                        best[slot] = rank;
                    }
                }
                None => {
                    slots.insert(folded.clone(), terms.len());
                    terms.push(folded);
                    best.push(rank);
                }
            }
        }

        if terms.is_empty() {
            return Ok(Self {
                automaton: None,
                best,
            });
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&terms)
            .map_err(|err| MatchError::Automaton {
                terms: terms.len(),
                message: err.to_string(),
            })?;

        Ok(Self {
            automaton: Some(automaton),
            best,
        })
    }

    /// Number of distinct folded search terms.
    pub(crate) fn term_count(&self) -> usize {
        self.best.len()
    }

    /// Best-ranked pattern whose term occurs in `value`, if any.
    pub(crate) fn best_in(&self, value: &str) -> Option<PatternRank> {
        let automaton = self.automaton.as_ref()?;
        if value.is_empty() {
            return None;
        }
        let folded = fold_text(value);
        automaton
            .find_overlapping_iter(&folded)
            .map(|found| self.best[found.pattern().as_usize()])
            .min()
    }
}
