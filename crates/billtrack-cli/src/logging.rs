//! Logging setup for the `billtrack` binary.
//!
//! Every library crate logs through `tracing`; only the binary installs a
//! subscriber.
//!
//! - `info`: stage progress and match counts
//! - `debug`: column resolution and output paths
//! - `trace`: audited rows, with values hidden unless `--log-data` is given

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder logged in place of billing values.
pub const REDACTED_VALUE: &str = "[REDACTED]";

const WORKSPACE_CRATES: [&str; 7] = [
    "billtrack",
    "billtrack_cli",
    "billtrack_common",
    "billtrack_ingest",
    "billtrack_match",
    "billtrack_model",
    "billtrack_transform",
];

/// Returns `value` when `--log-data` was given, otherwise [`REDACTED_VALUE`].
///
/// Billing rows carry subscription ids and resource paths.
pub fn redact_value(value: &str) -> &str {
    if LOG_DATA_ENABLED.load(Ordering::Relaxed) {
        value
    } else {
        REDACTED_VALUE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level applied to the billtrack crates; others stay at `warn`.
    pub level: LevelFilter,
    /// Whether `RUST_LOG` may replace `level`.
    pub use_env_filter: bool,
    pub format: LogFormat,
    pub with_ansi: bool,
    /// Append logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    pub log_data: bool,
}

impl LogConfig {
    /// Starts from `level`, which `RUST_LOG` may still override.
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            use_env_filter: true,
            format: LogFormat::default(),
            with_ansi: true,
            log_file: None,
            log_data: false,
        }
    }

    /// Pins `level`; `RUST_LOG` is ignored.
    #[must_use]
    pub fn with_explicit_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self.use_env_filter = false;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    fn filter(&self) -> EnvFilter {
        let directives = default_directives(self.level);
        if self.use_env_filter {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives))
        } else {
            EnvFilter::new(directives)
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(LevelFilter::INFO)
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails when the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    let layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            format_layer(config, Mutex::new(file))
        }
        None => format_layer(config, io::stderr),
    };
    tracing_subscriber::registry()
        .with(layer)
        .with(config.filter())
        .init();
    Ok(())
}

fn format_layer<W>(config: &LogConfig, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_target(false);
    match config.format {
        LogFormat::Json => layer.json().with_span_events(FmtSpan::CLOSE).boxed(),
        LogFormat::Compact => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        LogFormat::Pretty => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(WORKSPACE_CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_disables_env_override() {
        let config = LogConfig::default().with_explicit_level(LevelFilter::WARN);
        assert_eq!(config.level, LevelFilter::WARN);
        assert!(!config.use_env_filter);
        assert!(LogConfig::new(LevelFilter::DEBUG).use_env_filter);
    }

    #[test]
    fn directives_cover_workspace_crates() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("billtrack_match=debug"));
        assert!(directives.contains("billtrack_cli=debug"));
    }

    #[test]
    fn values_are_redacted_by_default() {
        assert_eq!(redact_value("/subscriptions/s1/vm01"), REDACTED_VALUE);
    }
}
