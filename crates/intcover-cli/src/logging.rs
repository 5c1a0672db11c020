//! Subscriber setup driven by `INTCOVER_*` environment variables.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const TRACE_VAR: &str = "INTCOVER_TRACE";
const FORMAT_VAR: &str = "INTCOVER_LOG_FORMAT";
const FILE_VAR: &str = "INTCOVER_LOG_FILE";

#[derive(Debug)]
pub enum LoggingError {
    InvalidFilter(String),
    InvalidFormat(String),
    LogFile { path: String, reason: String },
    Init(String),
}

impl LoggingError {
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter(_) => "LOGGING_INVALID_FILTER",
            LoggingError::InvalidFormat(_) => "LOGGING_INVALID_FORMAT",
            LoggingError::LogFile { .. } => "LOGGING_FILE",
            LoggingError::Init(_) => "LOGGING_INIT",
        }
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => {
                write!(f, "[{}] Invalid {TRACE_VAR}: {msg}", self.code())
            }
            LoggingError::InvalidFormat(value) => write!(
                f,
                "[{}] Invalid {FORMAT_VAR} '{value}' (expected 'json' or 'pretty')",
                self.code()
            ),
            LoggingError::LogFile { path, reason } => {
                write!(f, "[{}] Failed to open log file {path}: {reason}", self.code())
            }
            LoggingError::Init(msg) => {
                write!(f, "[{}] Failed to initialize logging: {msg}", self.code())
            }
        }
    }
}

impl std::error::Error for LoggingError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

fn parse_format(value: &str) -> Result<LogFormat, LoggingError> {
    if value.eq_ignore_ascii_case("pretty") {
        Ok(LogFormat::Pretty)
    } else if value.eq_ignore_ascii_case("json") {
        Ok(LogFormat::Json)
    } else {
        Err(LoggingError::InvalidFormat(value.to_string()))
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if level.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter(err.to_string()))
    }
}

fn open_log_file(path: &str) -> Result<Arc<File>, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(Arc::new)
        .map_err(|err| LoggingError::LogFile {
            path: path.to_string(),
            reason: err.to_string(),
        })
}

fn init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Install the global subscriber.
///
/// `level` overrides `INTCOVER_TRACE`; with neither set logging stays off.
/// Returns `false` when a subscriber is already installed.
pub fn init(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level = level
        .map(str::to_string)
        .or_else(|| env::var(TRACE_VAR).ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = build_filter(&level)?;
    let format = parse_format(&env::var(FORMAT_VAR).unwrap_or_else(|_| "pretty".to_string()))?;
    let log_file = env::var(FILE_VAR).ok().map(|path| open_log_file(&path)).transpose()?;

    match format {
        LogFormat::Json => {
            let base = tracing_subscriber::registry().with(filter).with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .json(),
            );
            match log_file {
                Some(file) => base
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false)
                            .json(),
                    )
                    .try_init()
                    .map_err(init_err)?,
                None => base.try_init().map_err(init_err)?,
            }
        }
        LogFormat::Pretty => {
            let base = tracing_subscriber::registry().with(filter).with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .pretty(),
            );
            match log_file {
                Some(file) => base
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false)
                            .pretty(),
                    )
                    .try_init()
                    .map_err(init_err)?,
                None => base.try_init().map_err(init_err)?,
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_is_case_insensitive() {
        assert_eq!(parse_format("JSON").unwrap(), LogFormat::Json);
        assert_eq!(parse_format("pretty").unwrap(), LogFormat::Pretty);
        let err = parse_format("xml").unwrap_err();
        assert_eq!(err.code(), "LOGGING_INVALID_FORMAT");
    }

    #[test]
    fn filter_accepts_off_and_directives() {
        assert!(build_filter("off").is_ok());
        assert!(build_filter("OFF").is_ok());
        assert!(build_filter("intcover_core=debug,warn").is_ok());
        let err = build_filter("intcover_core=notalevel").unwrap_err();
        assert!(err.to_string().starts_with("[LOGGING_INVALID_FILTER]"));
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let err = open_log_file("/nonexistent-dir/intcover.log").unwrap_err();
        assert_eq!(err.code(), "LOGGING_FILE");
    }
}
