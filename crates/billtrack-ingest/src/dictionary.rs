//! Tracking dictionary loading.
//!
//! The dictionary is the operator-maintained list of
//! `(search_term, replacement_label, priority)` rules. It may be kept as CSV,
//! TOML (`[[pattern]]` tables) or JSON (an array of objects). Every loader
//! validates the full set before returning, so a bad entry fails the run
//! before any billing row is touched.

use std::fs;
use std::path::Path;

use billtrack_common::parse_i64;
use billtrack_model::{CaseInsensitiveSet, DEFAULT_PRIORITY, MatchPattern, PatternSet};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::info;

use crate::error::{IngestError, Result};

const SEARCH_TERM_HEADERS: &[&str] = &["search_term", "search", "SearchTerm"];
const LABEL_HEADERS: &[&str] = &[
    "replacement_label",
    "label",
    "replacement",
    "ReplacementLabel",
];
const PRIORITY_HEADERS: &[&str] = &["priority", "Priority"];

/// Dictionary file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryFormat {
    Csv,
    Toml,
    Json,
}

impl DictionaryFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loads and validates a tracking dictionary, dispatching on extension.
pub fn load_patterns(path: &Path) -> Result<PatternSet> {
    let format =
        DictionaryFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
    let patterns = match format {
        DictionaryFormat::Csv => read_patterns_csv(path)?,
        DictionaryFormat::Toml => read_patterns_toml(path)?,
        DictionaryFormat::Json => read_patterns_json(path)?,
    };
    info!(
        path = %path.display(),
        patterns = patterns.len(),
        "loaded tracking dictionary"
    );
    Ok(patterns)
}

/// Reads a CSV dictionary with `search_term`, `replacement_label` and an
/// optional `priority` column.
///
/// Cells are taken verbatim, so a search term may begin with `#` or carry
/// surrounding spaces.
pub fn read_patterns_csv(path: &Path) -> Result<PatternSet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let lookup = CaseInsensitiveSet::new(headers.iter());
    let search_idx = header_index(&headers, &lookup, SEARCH_TERM_HEADERS, path)?;
    let label_idx = header_index(&headers, &lookup, LABEL_HEADERS, path)?;
    let priority_idx = lookup
        .find_any(PRIORITY_HEADERS.iter().copied())
        .and_then(|name| headers.iter().position(|h| h == name));

    let mut patterns = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        let priority = match priority_idx.and_then(|idx| record.get(idx)) {
            None => DEFAULT_PRIORITY,
            Some(raw) if raw.trim().is_empty() => DEFAULT_PRIORITY,
            Some(raw) => parse_i64(raw).ok_or_else(|| IngestError::InvalidValue {
                field: "priority".to_string(),
                value: raw.to_string(),
                path: path.to_path_buf(),
                line,
            })?,
        };
        patterns.push(MatchPattern {
            search_term: record.get(search_idx).unwrap_or_default().to_string(),
            replacement_label: record.get(label_idx).unwrap_or_default().to_string(),
            priority,
        });
    }
    validate(path, patterns)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDictionary {
    #[serde(default, rename = "pattern")]
    patterns: Vec<MatchPattern>,
}

/// Reads a TOML dictionary made of `[[pattern]]` tables.
pub fn read_patterns_toml(path: &Path) -> Result<PatternSet> {
    let text = fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let document: TomlDictionary = toml::from_str(&text).map_err(|source| IngestError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    validate(path, document.patterns)
}

/// Reads a JSON dictionary: an array of pattern objects.
pub fn read_patterns_json(path: &Path) -> Result<PatternSet> {
    let text = fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let patterns: Vec<MatchPattern> =
        serde_json::from_str(&text).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    validate(path, patterns)
}

fn validate(path: &Path, patterns: Vec<MatchPattern>) -> Result<PatternSet> {
    PatternSet::new(patterns).map_err(|source| IngestError::Patterns {
        path: path.to_path_buf(),
        source,
    })
}

fn header_index(
    headers: &StringRecord,
    lookup: &CaseInsensitiveSet,
    candidates: &[&str],
    path: &Path,
) -> Result<usize> {
    lookup
        .find_any(candidates.iter().copied())
        .and_then(|name| headers.iter().position(|h| h == name))
        .ok_or_else(|| IngestError::MissingColumn {
            column: candidates[0].to_string(),
            path: path.to_path_buf(),
        })
}

fn csv_error(path: &Path, err: csv::Error) -> IngestError {
    if let csv::ErrorKind::Io(io) = err.kind()
        && io.kind() == std::io::ErrorKind::NotFound
    {
        return IngestError::FileNotFound {
            path: path.to_path_buf(),
        };
    }
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
