//! Stages of a `billtrack match` run.
//!
//! Each stage runs inside its own span so the log output reads as
//! `patterns` → `ingest` → `match` → `output`.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use billtrack_ingest::{ColumnOverrides, load_patterns, read_billing_table};
use billtrack_match::TrackingMatcher;
use billtrack_transform::{
    TrackingFrame, TrackingResult, TransformOptions, apply_resource_tracking, build_audit_frame,
};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{debug, info, info_span, trace};

use crate::logging::redact_value;
use crate::types::{MatchRunResult, MatchSettings};

/// Default output locations next to the billing table:
/// `<stem>_tracked.csv` and `<stem>_audit.csv`.
pub fn default_output_paths(billing: &Path) -> (PathBuf, PathBuf) {
    let stem = billing
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("billing");
    let dir = billing.parent().unwrap_or_else(|| Path::new(""));
    (
        dir.join(format!("{stem}_tracked.csv")),
        dir.join(format!("{stem}_audit.csv")),
    )
}

/// Loads the tracking dictionary and builds the matcher.
pub fn load_matcher(path: &Path) -> Result<TrackingMatcher> {
    let span = info_span!("patterns", path = %path.display());
    let _guard = span.enter();
    let patterns =
        load_patterns(path).with_context(|| format!("load dictionary {}", path.display()))?;
    let matcher = TrackingMatcher::new(&patterns).context("build matcher")?;
    Ok(matcher)
}

/// Reads the billing table and resolves its columns.
pub fn ingest(path: &Path, columns: &ColumnOverrides) -> Result<TrackingFrame> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    let data =
        read_billing_table(path).with_context(|| format!("read billing {}", path.display()))?;
    let frame = TrackingFrame::new(data, columns)
        .with_context(|| format!("resolve columns in {}", path.display()))?
        .with_source(path);
    debug!(columns = ?frame.columns, "resolved billing columns");
    info!(
        rows = frame.record_count(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(frame)
}

/// Runs the matcher over the frame and adds the label column.
pub fn apply(
    frame: &mut TrackingFrame,
    matcher: &TrackingMatcher,
    options: &TransformOptions,
) -> Result<TrackingResult> {
    let span = info_span!("match", label_column = %options.label_column);
    let _guard = span.enter();
    let start = Instant::now();
    let result = apply_resource_tracking(frame, matcher, options).context("apply tracking")?;
    for record in &result.audit {
        trace!(
            row_index = record.row_index,
            instance_id = redact_value(&record.instance_id),
            selected_field = %record.selected_field,
            "audited row"
        );
    }
    info!(
        matched = result.summary.matched,
        audited = result.audit.len(),
        duration_ms = start.elapsed().as_millis(),
        "match complete"
    );
    Ok(result)
}

/// Paths written by [`output`].
#[derive(Debug, Default)]
pub struct OutputResult {
    pub tracked: Option<PathBuf>,
    pub audit: Option<PathBuf>,
}

/// Writes the labelled table and, when any row was ambiguous, the audit table.
///
/// Without ambiguous rows an audit table left by an earlier run is removed.
pub fn output(
    frame: &mut TrackingFrame,
    result: &TrackingResult,
    settings: &MatchSettings,
) -> Result<OutputResult> {
    let span = info_span!("output");
    let _guard = span.enter();
    if settings.dry_run {
        info!(rows = frame.record_count(), "output skipped (dry run)");
        return Ok(OutputResult::default());
    }

    write_csv(&mut frame.data, &settings.output)?;
    let audit = if result.audit.is_empty() {
        remove_stale(&settings.audit)?;
        debug!("no ambiguous rows, audit table not written");
        None
    } else {
        let mut audit = build_audit_frame(&result.audit).context("build audit table")?;
        write_csv(&mut audit, &settings.audit)?;
        Some(settings.audit.clone())
    };
    Ok(OutputResult {
        tracked: Some(settings.output.clone()),
        audit,
    })
}

fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "removed stale audit table");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("remove {}", path.display())),
    }
}

/// Writes `df` as CSV with a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(())
}

/// Runs every stage for one billing table.
pub fn run_match(settings: &MatchSettings) -> Result<MatchRunResult> {
    let span = info_span!("billtrack", billing = %settings.billing.display());
    let _guard = span.enter();

    let matcher = load_matcher(&settings.patterns)?;
    let mut frame = ingest(&settings.billing, &settings.columns)?;
    let options = TransformOptions::default()
        .with_label_column(settings.label_column.clone())
        .with_matching(settings.matching);
    let result = apply(&mut frame, &matcher, &options)?;
    let written = output(&mut frame, &result, settings)?;

    Ok(MatchRunResult {
        billing: settings.billing.clone(),
        patterns: settings.patterns.clone(),
        pattern_count: matcher.patterns().len(),
        summary: result.summary,
        output: written.tracked,
        audit: written.audit,
    })
}
