//! Logging and tracing configuration
//!
//! Console output always goes to stderr so stdout stays free for generated
//! records. A daily rolling JSON file can be added next to it.

use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Boxed error returned by logging initialization
pub type LoggingInitError = Box<dyn std::error::Error + Send + Sync>;

type FilteredRegistry = Layered<EnvFilter, Registry>;

/// Where and how synthesis logs are written
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level applied to this crate when no filter is given
    pub level: Level,
    /// Emit console output as JSON instead of pretty text
    pub json_console: bool,
    /// Directory of the rolling log file; no file when absent
    pub log_directory: Option<PathBuf>,
    /// File name prefix of the rolling log file
    pub file_prefix: String,
    /// Log span close events with their timings
    pub span_timings: bool,
    /// ANSI colors on the console
    pub ansi: bool,
    /// Explicit filter directive, overriding `RUST_LOG` and `level`
    pub env_filter: Option<String>,
}

/// Keeps the file writer flushing until dropped
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_console: false,
            log_directory: None,
            file_prefix: env!("CARGO_PKG_NAME").to_string(),
            span_timings: false,
            ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// JSON console output
    pub fn with_json_console(mut self) -> Self {
        self.json_console = true;
        self
    }

    /// Also write JSON logs to a daily rolling file in `directory`
    pub fn with_log_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Set the rolling file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Log span timings, e.g. how long a CDR batch took
    pub fn with_span_timings(mut self) -> Self {
        self.span_timings = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    /// Use an explicit filter directive
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_timings {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggingInitError> {
        match &self.env_filter {
            Some(filter) => Ok(EnvFilter::try_new(filter)?),
            None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!("telco_synth={}", self.level))
            })),
        }
    }

    fn console_layer(&self) -> Box<dyn Layer<FilteredRegistry> + Send + Sync> {
        if self.json_console {
            fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(self.span_events())
                .boxed()
        } else {
            fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_ansi(self.ansi)
                .with_span_events(self.span_events())
                .boxed()
        }
    }

    /// Install the global tracing subscriber
    ///
    /// Hold the returned guard for as long as file logs should be written.
    pub fn init(self) -> Result<LoggingGuard, LoggingInitError> {
        let (file_layer, file_guard) = match &self.log_directory {
            Some(directory) => {
                let (writer, guard) = non_blocking(rolling::daily(directory, &self.file_prefix));
                let layer = fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_span_events(self.span_events());
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        Registry::default()
            .with(self.build_filter()?)
            .with(self.console_layer())
            .with(file_layer)
            .try_init()?;

        info!(
            level = %self.level,
            log_directory = ?self.log_directory,
            "Logging initialized"
        );
        Ok(LoggingGuard { _file: file_guard })
    }

    /// Warnings only; the binary's default so progress output stays readable
    pub fn init_quiet() -> Result<LoggingGuard, LoggingInitError> {
        Self::new().with_level(Level::WARN).init()
    }

    /// JSON on the console plus a rolling file in `log_dir`
    pub fn init_prod(log_dir: impl Into<PathBuf>) -> Result<LoggingGuard, LoggingInitError> {
        Self::new()
            .with_json_console()
            .with_log_directory(log_dir)
            .without_ansi()
            .init()
    }

    /// Warnings only, no colors
    pub fn init_test() -> Result<LoggingGuard, LoggingInitError> {
        Self::new().with_level(Level::WARN).without_ansi().init()
    }

    /// INFO with span timings
    pub fn init_verbose() -> Result<LoggingGuard, LoggingInitError> {
        Self::new().with_level(Level::INFO).with_span_timings().init()
    }

    /// DEBUG with span timings
    pub fn init_debug() -> Result<LoggingGuard, LoggingInitError> {
        Self::new().with_level(Level::DEBUG).with_span_timings().init()
    }
}

/// Structured event tagged with the synthesis component
#[macro_export]
macro_rules! sim_event {
    ($level:ident, $message:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::$level!(
            message = $message,
            component = "synthesis",
            $($key = $value,)*
        );
    };
    ($level:ident, $message:expr) => {
        tracing::$level!(
            message = $message,
            component = "synthesis",
        );
    };
}

/// Span for timing a generation stage
#[macro_export]
macro_rules! perf_span {
    ($name:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::info_span!(
            $name,
            component = "performance",
            $($key = $value,)*
        )
    };
    ($name:expr) => {
        tracing::info_span!(
            $name,
            component = "performance",
        )
    };
}
