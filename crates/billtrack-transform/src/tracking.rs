//! Writes tracking labels onto a billing frame.

use billtrack_ingest::billing_rows_from_frame;
use billtrack_match::{MatchOptions, TrackingMatcher};
use billtrack_model::{AuditRecord, MatchSummary};
use polars::prelude::{Column, NamedFrom};
use tracing::{debug, info, info_span};

use crate::error::{Result, TransformError};
use crate::frame::{DEFAULT_LABEL_COLUMN, TrackingFrame};

/// Options for [`apply_resource_tracking`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Name of the column that receives the labels.
    pub label_column: String,
    pub matching: MatchOptions,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            matching: MatchOptions::default(),
        }
    }
}

impl TransformOptions {
    #[must_use]
    pub fn with_label_column(mut self, name: impl Into<String>) -> Self {
        self.label_column = name.into();
        self
    }

    #[must_use]
    pub fn with_matching(mut self, matching: MatchOptions) -> Self {
        self.matching = matching;
        self
    }
}

/// Audit trail and counts produced while labelling a frame.
#[derive(Debug, Clone)]
pub struct TrackingResult {
    pub audit: Vec<AuditRecord>,
    pub summary: MatchSummary,
}

/// Resolves every row of `frame` and stores the labels in the label column.
///
/// An existing label column is replaced. Unmatched rows get a null label.
///
/// # Errors
///
/// Fails when the label column would overwrite a billing input column or the
/// frame cannot be read; matching itself never fails.
pub fn apply_resource_tracking(
    frame: &mut TrackingFrame,
    matcher: &TrackingMatcher,
    options: &TransformOptions,
) -> Result<TrackingResult> {
    let span = info_span!(
        "resource_tracking",
        rows = frame.record_count(),
        source = ?frame.source
    );
    let _guard = span.enter();

    if frame.is_input_column(&options.label_column) {
        return Err(TransformError::LabelColumnCollision {
            column: options.label_column.clone(),
        });
    }

    let rows = billing_rows_from_frame(&frame.data, &frame.columns)?;
    let report = matcher.match_rows_with(&rows, &options.matching);
    let summary = report.summary();

    if frame.data.column(&options.label_column).is_ok() {
        debug!(column = %options.label_column, "replacing existing label column");
    }
    let labels = Column::new(options.label_column.as_str().into(), report.labels);
    frame.data.with_column(labels)?;

    info!(
        rows = summary.rows,
        matched = summary.matched,
        unmatched = summary.unmatched,
        ambiguous = summary.ambiguous,
        "applied resource tracking"
    );
    Ok(TrackingResult {
        audit: report.audit,
        summary,
    })
}
