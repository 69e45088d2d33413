//! Resource tracking matcher.
//!
//! Resolution rule for one billing row:
//!
//! 1. Each candidate field is searched case-insensitively for every search
//!    term. Among the patterns found in a field, the lowest priority wins and
//!    equal priorities fall back to dictionary order.
//! 2. Fields are consulted in [`MatchField::PRECEDENCE`]; the first field with
//!    a winner supplies the row's label, uppercased.
//! 3. A row where two or more fields had a winner gets an [`AuditRecord`].

use std::num::NonZeroUsize;
use std::thread;

use billtrack_model::{
    AuditRecord, BillingRow, MatchField, MatchOutcome, MatchPattern, MatchReport, PatternRank,
    PatternSet,
};
use tracing::{debug, trace};

use crate::error::MatchError;
use crate::patterns::TermIndex;
use crate::utils::output_label;

/// Default number of rows per worker partition.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Batch execution options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Resolve row partitions on worker threads.
    pub parallel: bool,
    /// Minimum rows per partition; batches this small run on the caller's thread.
    pub chunk_size: usize,
    /// Upper bound on worker threads (defaults to available parallelism).
    pub max_threads: Option<NonZeroUsize>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_threads: None,
        }
    }
}

impl MatchOptions {
    /// Single-threaded execution.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn with_max_threads(mut self, max_threads: Option<NonZeroUsize>) -> Self {
        self.max_threads = max_threads;
        self
    }

    fn worker_count(&self) -> usize {
        self.max_threads
            .or_else(|| thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }
}

/// Winning pattern of a single candidate field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMatch<'a> {
    pub field: MatchField,
    pub pattern_index: usize,
    pub pattern: &'a MatchPattern,
}

impl FieldMatch<'_> {
    /// Uppercase replacement label.
    pub fn label(&self) -> String {
        output_label(&self.pattern.replacement_label)
    }
}

/// Precomputed matcher over one pattern set.
///
/// Immutable once built, so a single matcher can serve any number of batches
/// and worker threads.
#[derive(Debug, Clone)]
pub struct TrackingMatcher {
    patterns: PatternSet,
    index: TermIndex,
}

impl TrackingMatcher {
    /// Builds the search structure for `patterns`.
    ///
    /// # Errors
    ///
    /// Fails only when the automaton exceeds its internal size limits.
    pub fn new(patterns: &PatternSet) -> Result<Self, MatchError> {
        let index = TermIndex::build(patterns)?;
        debug!(
            patterns = patterns.len(),
            distinct_terms = index.term_count(),
            "built tracking matcher"
        );
        Ok(Self {
            patterns: patterns.clone(),
            index,
        })
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Best pattern whose search term occurs in `value`, case-insensitively.
    pub fn best_match(&self, value: &str) -> Option<&MatchPattern> {
        self.best_rank(value)
            .and_then(|rank| self.patterns.get(rank.index))
    }

    fn best_rank(&self, value: &str) -> Option<PatternRank> {
        self.index.best_in(value)
    }

    /// Per-field winners for `row`, in precedence order.
    ///
    /// Fields the row does not carry, or that match nothing, are omitted.
    pub fn field_matches(&self, row: &BillingRow) -> Vec<FieldMatch<'_>> {
        MatchField::PRECEDENCE
            .iter()
            .filter_map(|&field| {
                let value = row.field(field)?;
                let rank = self.best_rank(value)?;
                let pattern = self.patterns.get(rank.index)?;
                Some(FieldMatch {
                    field,
                    pattern_index: rank.index,
                    pattern,
                })
            })
            .collect()
    }

    /// Resolves one row. `row_index` is only recorded on the audit record.
    pub fn resolve_row(
        &self,
        row_index: usize,
        row: &BillingRow,
    ) -> (MatchOutcome, Option<AuditRecord>) {
        let matches = self.field_matches(row);
        let Some(selected) = matches.first() else {
            return (MatchOutcome::unmatched(), None);
        };
        let selected_match = selected.label();
        let outcome = MatchOutcome {
            label: Some(selected_match.clone()),
            selected_field: Some(selected.field),
        };
        if matches.len() < 2 {
            return (outcome, None);
        }

        let label_for = |field: MatchField| {
            matches
                .iter()
                .find(|m| m.field == field)
                .map(FieldMatch::label)
                .unwrap_or_default()
        };
        trace!(
            row_index,
            fields = matches.len(),
            selected_field = %selected.field,
            "ambiguous tracking match"
        );
        let record = AuditRecord {
            row_index,
            instance_id: row.instance_id.clone(),
            last_segment_match: label_for(MatchField::LastSegment),
            resource_group_match: label_for(MatchField::ResourceGroup),
            selected_match,
            selected_field: selected.field,
        };
        (outcome, Some(record))
    }

    /// Resolves a batch on the calling thread.
    ///
    /// Labels are aligned with `rows`; audit records follow row order.
    pub fn match_rows(&self, rows: &[BillingRow]) -> MatchReport {
        self.match_partition(rows, 0)
    }

    /// Resolves a batch, splitting it across worker threads when allowed.
    ///
    /// The result is identical to [`Self::match_rows`].
    pub fn match_rows_with(&self, rows: &[BillingRow], options: &MatchOptions) -> MatchReport {
        let chunk_size = options.chunk_size.max(1);
        let workers = options.worker_count();
        if !options.parallel || workers < 2 || rows.len() <= chunk_size {
            return self.match_rows(rows);
        }

        let partition = rows.len().div_ceil(workers).max(chunk_size);
        debug!(
            rows = rows.len(),
            partition,
            workers = rows.len().div_ceil(partition),
            "matching rows in parallel"
        );
        let partials: Vec<MatchReport> = thread::scope(|scope| {
            let handles: Vec<_> = rows
                .chunks(partition)
                .enumerate()
                .map(|(chunk, part)| {
                    let offset = chunk * partition;
                    scope.spawn(move || self.match_partition(part, offset))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });

        let mut report = MatchReport::with_capacity(rows.len());
        for partial in partials {
            report.extend(partial);
        }
        report
    }

    fn match_partition(&self, rows: &[BillingRow], offset: usize) -> MatchReport {
        let mut report = MatchReport::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            let (outcome, audit) = self.resolve_row(offset + position, row);
            report.push(outcome, audit);
        }
        report
    }
}

/// Resolves `rows` against `patterns` in one call.
///
/// # Errors
///
/// Propagates [`TrackingMatcher::new`] failures; no per-row errors exist.
pub fn match_rows(rows: &[BillingRow], patterns: &PatternSet) -> Result<MatchReport, MatchError> {
    Ok(TrackingMatcher::new(patterns)?.match_rows(rows))
}
