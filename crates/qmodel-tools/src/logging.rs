//! Structured logging setup.
//!
//! The model crates emit `tracing` events with `component`, `operation` and
//! `status` fields. [`enable_logging`] routes them to stderr and, optionally,
//! a file.
//!
//! Configuration comes from the environment unless overridden:
//!
//! - `QMODEL_TRACE`: filter directive, e.g. `debug` or `qmodel_core=trace`
//!   (default `off`)
//! - `QMODEL_LOG_FORMAT`: `pretty` (default) or `json`
//! - `QMODEL_LOG_FILE`: append events to this path as well

use std::env;
use std::fs::{File, OpenOptions};
use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const TRACE_ENV: &str = "QMODEL_TRACE";
pub const FORMAT_ENV: &str = "QMODEL_LOG_FORMAT";
pub const FILE_ENV: &str = "QMODEL_LOG_FILE";

/// Errors produced while installing the subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum LoggingError {
    InvalidFilter { directive: String, reason: String },
    InvalidFormat { format: String },
    LogFile { path: String, reason: String },
    Init { reason: String },
}

impl LoggingError {
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter { .. } => "LOG_FILTER_INVALID",
            LoggingError::InvalidFormat { .. } => "LOG_FORMAT_INVALID",
            LoggingError::LogFile { .. } => "LOG_FILE_UNAVAILABLE",
            LoggingError::Init { .. } => "LOG_INIT_FAILED",
        }
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter { directive, reason } => write!(
                f,
                "[{}] Invalid log filter {:?}: {}",
                self.code(),
                directive,
                reason
            ),
            LoggingError::InvalidFormat { format } => write!(
                f,
                "[{}] Invalid {} {:?} (expected 'json' or 'pretty')",
                self.code(),
                FORMAT_ENV,
                format
            ),
            LoggingError::LogFile { path, reason } => write!(
                f,
                "[{}] Failed to open log file {}: {}",
                self.code(),
                path,
                reason
            ),
            LoggingError::Init { reason } => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Resolved subscriber settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub directive: String,
    pub format: LogFormat,
    pub file: Option<String>,
}

impl LoggingConfig {
    /// Combine an explicit level with the raw environment values.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::InvalidFormat`] for a format other than
    /// `pretty` or `json`.
    pub fn resolve(
        level: Option<&str>,
        trace: Option<String>,
        format: Option<String>,
        file: Option<String>,
    ) -> Result<Self, LoggingError> {
        let directive = level
            .map(str::to_owned)
            .or(trace)
            .unwrap_or_else(|| "off".to_string());
        let format = match format {
            None => LogFormat::Pretty,
            Some(value) if value.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(value) => return Err(LoggingError::InvalidFormat { format: value }),
        };
        Ok(Self {
            directive,
            format,
            file: file.filter(|path| !path.is_empty()),
        })
    }

    /// Read [`TRACE_ENV`], [`FORMAT_ENV`] and [`FILE_ENV`].
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn from_env(level: Option<&str>) -> Result<Self, LoggingError> {
        Self::resolve(
            level,
            env::var(TRACE_ENV).ok(),
            env::var(FORMAT_ENV).ok(),
            env::var(FILE_ENV).ok(),
        )
    }

    /// # Errors
    ///
    /// Returns [`LoggingError::InvalidFilter`] if the directive does not parse.
    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        if self.directive.eq_ignore_ascii_case("off") {
            return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
        }
        EnvFilter::try_new(&self.directive).map_err(|err| LoggingError::InvalidFilter {
            directive: self.directive.clone(),
            reason: err.to_string(),
        })
    }
}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| LoggingError::LogFile {
            path: path.to_string(),
            reason: err.to_string(),
        })
}

fn map_init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init {
        reason: err.to_string(),
    }
}

/// Install the global subscriber.
///
/// When `level` is `None` the filter comes from `QMODEL_TRACE`, defaulting to
/// `off`. Returns `Ok(true)` when logging was initialized and `Ok(false)` if
/// a subscriber is already configured.
///
/// # Errors
///
/// Returns a [`LoggingError`] for an invalid filter or format, an unopenable
/// log file, or a failed installation.
pub fn enable_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let config = LoggingConfig::from_env(level)?;
    let filter = config.filter()?;
    let file = config.file.as_deref().map(open_log_file).transpose()?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .json();
            let file_layer = file.map(|file| {
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .json()
            });
            registry
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(map_init_err)?;
        }
        LogFormat::Pretty => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .pretty();
            let file_layer = file.map(|file| {
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .pretty()
            });
            registry
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(map_init_err)?;
        }
    }

    tracing::debug!(
        component = "logging",
        operation = "enable",
        status = "success",
        directive = %config.directive,
        file = config.file.as_deref().unwrap_or("-"),
        "Logging enabled"
    );
    Ok(true)
}
