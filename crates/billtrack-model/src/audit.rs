//! Match outcomes, ambiguity audit records and batch reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::row::MatchField;

/// Resolved tracking label of a single row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Uppercase replacement label, or `None` when no field matched.
    pub label: Option<String>,
    /// Field whose match determined the label.
    pub selected_field: Option<MatchField>,
}

impl MatchOutcome {
    pub fn unmatched() -> Self {
        Self::default()
    }
}

/// Trail left for a row where two or more fields matched some pattern.
///
/// Label fields are uppercase; a field that produced no match is recorded as
/// an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Position of the row in the input batch.
    pub row_index: usize,
    pub instance_id: String,
    pub last_segment_match: String,
    pub resource_group_match: String,
    pub selected_match: String,
    pub selected_field: MatchField,
}

/// Result of matching one batch: aligned labels plus the audit trail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// One entry per input row, in input order.
    pub labels: Vec<Option<String>>,
    /// Selected field per row, aligned with `labels`.
    pub selected_fields: Vec<Option<MatchField>>,
    /// One record per ambiguous row, in row order.
    pub audit: Vec<AuditRecord>,
}

impl MatchReport {
    pub fn with_capacity(rows: usize) -> Self {
        Self {
            labels: Vec::with_capacity(rows),
            selected_fields: Vec::with_capacity(rows),
            audit: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: MatchOutcome, audit: Option<AuditRecord>) {
        self.labels.push(outcome.label);
        self.selected_fields.push(outcome.selected_field);
        if let Some(record) = audit {
            self.audit.push(record);
        }
    }

    /// Appends another report that covers the rows following this one.
    pub fn extend(&mut self, other: MatchReport) {
        self.labels.extend(other.labels);
        self.selected_fields.extend(other.selected_fields);
        self.audit.extend(other.audit);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn summary(&self) -> MatchSummary {
        let mut summary = MatchSummary {
            rows: self.labels.len(),
            ambiguous: self.audit.len(),
            ..MatchSummary::default()
        };
        for (label, field) in self.labels.iter().zip(&self.selected_fields) {
            match label {
                Some(label) => {
                    summary.matched += 1;
                    *summary.by_label.entry(label.clone()).or_insert(0) += 1;
                }
                None => summary.unmatched += 1,
            }
            if let Some(field) = field {
                *summary.by_field.entry(*field).or_insert(0) += 1;
            }
        }
        summary
    }
}

/// Aggregate counts over a [`MatchReport`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub rows: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub ambiguous: usize,
    pub by_field: BTreeMap<MatchField, usize>,
    pub by_label: BTreeMap<String, usize>,
}

impl MatchSummary {
    /// Fraction of rows that received a label (0.0 for an empty batch).
    pub fn match_ratio(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.matched as f64 / self.rows as f64
        }
    }
}
