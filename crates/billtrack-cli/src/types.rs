use std::path::PathBuf;

use billtrack_ingest::ColumnOverrides;
use billtrack_match::MatchOptions;
use billtrack_model::MatchSummary;

/// Values given on the `billtrack match` command line.
#[derive(Debug, Clone, Default)]
pub struct MatchFlags {
    pub billing: PathBuf,
    pub patterns: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub audit: Option<PathBuf>,
    pub label_column: Option<String>,
    pub no_parallel: bool,
    pub chunk_size: Option<usize>,
    pub dry_run: bool,
}

/// Fully resolved settings for one `billtrack match` run.
#[derive(Debug, Clone)]
pub struct MatchSettings {
    pub billing: PathBuf,
    pub patterns: PathBuf,
    pub output: PathBuf,
    pub audit: PathBuf,
    pub label_column: String,
    pub columns: ColumnOverrides,
    pub matching: MatchOptions,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct MatchRunResult {
    pub billing: PathBuf,
    pub patterns: PathBuf,
    pub pattern_count: usize,
    pub summary: MatchSummary,
    /// Written labelled table; `None` on a dry run.
    pub output: Option<PathBuf>,
    /// Written audit table; `None` on a dry run or when nothing was ambiguous.
    pub audit: Option<PathBuf>,
}
