//! `billtrack` configuration file.
//!
//! All keys are optional; a value given on the command line always wins over
//! the file, and the file wins over the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use billtrack_ingest::ColumnOverrides;
use billtrack_match::MatchOptions;
use billtrack_transform::DEFAULT_LABEL_COLUMN;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pipeline::default_output_paths;
use crate::types::{MatchFlags, MatchSettings};

/// Settings read from a TOML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BilltrackConfig {
    /// Tracking dictionary, relative to the configuration file.
    pub patterns: Option<PathBuf>,
    pub label_column: Option<String>,
    #[serde(default)]
    pub columns: ColumnOverrides,
    #[serde(default)]
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchingConfig {
    pub parallel: Option<bool>,
    pub chunk_size: Option<usize>,
}

impl BilltrackConfig {
    /// Loads a configuration file, resolving relative paths against its
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config = Self::from_toml(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        if let Some(patterns) = config.patterns.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.patterns = Some(base.join(patterns));
        }
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Merges command-line flags over `config` over the built-in defaults.
///
/// # Errors
///
/// Fails when neither the flags nor the config name a dictionary, or when the
/// chunk size is zero.
pub fn resolve_settings(flags: &MatchFlags, config: BilltrackConfig) -> Result<MatchSettings> {
    let Some(patterns) = flags.patterns.clone().or(config.patterns) else {
        bail!("no tracking dictionary given (use --patterns or set `patterns` in the config)");
    };

    let mut matching = MatchOptions::default();
    if let Some(parallel) = config.matching.parallel {
        matching = matching.with_parallel(parallel);
    }
    if flags.no_parallel {
        matching = matching.with_parallel(false);
    }
    if let Some(chunk_size) = flags.chunk_size.or(config.matching.chunk_size) {
        if chunk_size == 0 {
            bail!("chunk size must be positive");
        }
        matching = matching.with_chunk_size(chunk_size);
    }

    let (default_output, default_audit) = default_output_paths(&flags.billing);
    Ok(MatchSettings {
        billing: flags.billing.clone(),
        patterns,
        output: flags.output.clone().unwrap_or(default_output),
        audit: flags.audit.clone().unwrap_or(default_audit),
        label_column: flags
            .label_column
            .clone()
            .or(config.label_column)
            .unwrap_or_else(|| DEFAULT_LABEL_COLUMN.to_string()),
        columns: config.columns,
        matching,
        dry_run: flags.dry_run,
    })
}
