//! Logging for autofake
//!
//! The container reports registry writes and constructor attempts through
//! `tracing`. Nothing is printed unless a subscriber is installed; test
//! suites usually install one through [`LogConfig`]:
//!
//! ```no_run
//! use autofake_core::logging::*;
//!
//! // Reads AUTOFAKE_LOG_LEVEL / AUTOFAKE_LOG_FORMAT / AUTOFAKE_LOG_FILTER
//! let _guard = LogConfig::from_env().try_init();
//! debug!("Fake container ready");
//! ```
//!
//! # Environment Variables
//!
//! - `AUTOFAKE_LOG_LEVEL=trace|debug|info|warn|error` - minimum level
//! - `AUTOFAKE_LOG_FORMAT=json|pretty|compact|plain` - output format
//! - `AUTOFAKE_LOG_FILTER=autofake_core=trace` - `EnvFilter` directive,
//!   overrides the level

use serde::Deserialize;
use std::env;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter, TestWriter},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

pub use tracing::{debug, error, info, trace, warn};

pub const LEVEL_ENV: &str = "AUTOFAKE_LOG_LEVEL";
pub const FORMAT_ENV: &str = "AUTOFAKE_LOG_FORMAT";
pub const FILTER_ENV: &str = "AUTOFAKE_LOG_FILTER";

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Convert to string for EnvFilter
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Structured, machine-readable
    Json,
    /// Multi-line, for reading a single failing test
    Pretty,
    /// Single line per event
    Compact,
    /// Plain text without colors
    Plain,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" => Some(LogFormat::Pretty),
            "compact" => Some(LogFormat::Compact),
            "plain" => Some(LogFormat::Plain),
            _ => None,
        }
    }
}

/// Output destination for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Captured by the test harness (default)
    TestWriter,
    Stdout,
    Stderr,
}

/// Logging configuration
///
/// ```
/// # use autofake_core::logging::*;
/// let config = LogConfig::new()
///     .level(LogLevel::Debug)
///     .format(LogFormat::Pretty)
///     .output(LogOutput::Stderr);
/// assert_eq!(config.level, LogLevel::Debug);
/// ```
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Include target (module path)
    pub targets: bool,
    pub thread_ids: bool,
    /// Include file and line numbers
    pub file_line: bool,
    /// Custom environment filter (overrides level if set)
    pub env_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            output: LogOutput::TestWriter,
            targets: true,
            thread_ids: false,
            file_line: false,
            env_filter: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration from `AUTOFAKE_LOG_*` variables; unknown values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let level = lookup(LEVEL_ENV)
            .and_then(|s| LogLevel::parse(&s))
            .unwrap_or(defaults.level);

        let format = lookup(FORMAT_ENV)
            .and_then(|s| LogFormat::parse(&s))
            .unwrap_or(defaults.format);

        let env_filter = lookup(FILTER_ENV).filter(|s| !s.trim().is_empty());

        Self {
            level,
            format,
            env_filter,
            ..defaults
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_targets(mut self, enable: bool) -> Self {
        self.targets = enable;
        self
    }

    pub fn with_thread_ids(mut self, enable: bool) -> Self {
        self.thread_ids = enable;
        self
    }

    pub fn with_file_line(mut self, enable: bool) -> Self {
        self.file_line = enable;
        self
    }

    /// Set custom environment filter, e.g. `"autofake_core=trace"`
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn build_filter(&self) -> EnvFilter {
        self.env_filter
            .as_deref()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new(self.level.as_str()))
    }

    /// Install the global subscriber.
    ///
    /// Fails when a subscriber is already installed, which happens whenever
    /// several tests in one binary initialize logging; those callers can
    /// ignore the error. Keep the returned guard alive for stdout/stderr
    /// output so buffered lines are flushed.
    pub fn try_init(self) -> Result<Option<WorkerGuard>, TryInitError> {
        let filter = self.build_filter();

        match self.output {
            LogOutput::TestWriter => {
                self.init_with_writer(TestWriter::default(), filter)?;
                Ok(None)
            }
            LogOutput::Stdout => {
                let (writer, guard) = tracing_appender::non_blocking(io::stdout());
                self.init_with_writer(writer, filter)?;
                Ok(Some(guard))
            }
            LogOutput::Stderr => {
                let (writer, guard) = tracing_appender::non_blocking(io::stderr());
                self.init_with_writer(writer, filter)?;
                Ok(Some(guard))
            }
        }
    }

    fn init_with_writer<W>(&self, writer: W, filter: EnvFilter) -> Result<(), TryInitError>
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let registry = tracing_subscriber::registry().with(filter);

        match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids)
                        .with_file(self.file_line)
                        .with_line_number(self.file_line),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids)
                        .with_file(self.file_line)
                        .with_line_number(self.file_line),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids)
                        .with_file(self.file_line)
                        .with_line_number(self.file_line),
                )
                .try_init(),
            LogFormat::Plain => registry
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids)
                        .with_file(self.file_line)
                        .with_line_number(self.file_line),
                )
                .try_init(),
        }
    }
}
