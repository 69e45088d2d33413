use anyhow::{Context, Result};
use billtrack_cli::config::{BilltrackConfig, resolve_settings};
use billtrack_cli::pipeline::run_match;
use billtrack_cli::summary::patterns_table;
use billtrack_cli::types::{MatchFlags, MatchRunResult};
use billtrack_ingest::load_patterns;

use crate::cli::{MatchArgs, PatternsArgs};

pub fn run_patterns(args: &PatternsArgs) -> Result<()> {
    let patterns = load_patterns(&args.file)
        .with_context(|| format!("load dictionary {}", args.file.display()))?;
    println!("Dictionary: {} ({} patterns)", args.file.display(), patterns.len());
    println!("{}", patterns_table(&patterns));
    Ok(())
}

pub fn run_match_command(args: &MatchArgs) -> Result<MatchRunResult> {
    let config = match &args.config {
        Some(path) => BilltrackConfig::load(path)?,
        None => BilltrackConfig::default(),
    };
    let settings = resolve_settings(&match_flags(args), config)?;
    run_match(&settings)
}

fn match_flags(args: &MatchArgs) -> MatchFlags {
    MatchFlags {
        billing: args.billing.clone(),
        patterns: args.patterns.clone(),
        output: args.output.clone(),
        audit: args.audit.clone(),
        label_column: args.label_column.clone(),
        no_parallel: args.no_parallel,
        chunk_size: args.chunk_size,
        dry_run: args.dry_run,
    }
}
