//! CLI argument definitions for `billtrack`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "billtrack",
    version,
    about = "Tag cloud billing rows with resource tracking labels",
    long_about = "Tag cloud billing rows with resource tracking labels.\n\n\
                  Each row is matched against a tracking dictionary of \
                  (search term, label, priority) rules. Rows where more than one \
                  field matched are written to an audit table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow billing row values in trace output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Label a billing table and write the audit trail.
    Match(MatchArgs),

    /// Validate a tracking dictionary and print it in rank order.
    Patterns(PatternsArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Billing table (CSV) to label.
    #[arg(value_name = "BILLING_CSV")]
    pub billing: PathBuf,

    /// Tracking dictionary (.csv, .toml or .json).
    #[arg(long = "patterns", short = 'p', value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Configuration file (TOML).
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Labelled output table (default: <BILLING_CSV stem>_tracked.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Audit table (default: <BILLING_CSV stem>_audit.csv).
    #[arg(long = "audit", value_name = "PATH")]
    pub audit: Option<PathBuf>,

    /// Name of the label column added to the output.
    #[arg(long = "label-column", value_name = "NAME")]
    pub label_column: Option<String>,

    /// Match rows on the calling thread only.
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Minimum rows per worker when matching in parallel.
    #[arg(long = "chunk-size", value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Match and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct PatternsArgs {
    /// Tracking dictionary (.csv, .toml or .json).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
