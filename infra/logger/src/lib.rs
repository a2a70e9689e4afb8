//! # Logger
//!
//! Installs the global `tracing` subscriber for loadmap binaries.
//!
//! * Console output goes to **stderr**, so command output on stdout stays clean.
//! * Optional rolling log files through a non-blocking writer.
//! * `compact` or `json` records, chosen by [`LogFormat`].
//! * `RUST_LOG` is honored when no explicit directives are given.
//!
//! ## Example
//!
//! ```rust
//! use loadmap_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("loadmap").level(LevelFilter::DEBUG).init().unwrap();
//! tracing::debug!("ready");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use loadmap_domain::config::{LogFormat, LoggingConfig};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

/// Configures and installs the global subscriber. Created by [`Logger::builder`].
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    directives: Option<String>,
    format: LogFormat,
    console: bool,
    directory: Option<PathBuf>,
    rotation: Rotation,
    max_files: usize,
}

impl LoggerBuilder {
    /// Builder preloaded from [`LoggingConfig`] settings.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] if `level` is not a level name.
    pub fn from_config(name: impl Into<String>, config: &LoggingConfig) -> Result<Self, LoggerError> {
        let level = LevelFilter::from_str(config.level.trim()).map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("unknown log level '{}': {e}", config.level).into(),
                context: Some("logging.level".into()),
            }
        })?;

        let mut builder = Logger::builder(name).level(level).format(config.format);
        builder.directory.clone_from(&config.directory);
        Ok(builder)
    }

    /// Minimum level when neither `RUST_LOG` nor explicit directives say otherwise.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Explicit filter directives (e.g., `loadmap_kernel=debug`); these replace `RUST_LOG`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Also write log files into `directory`, prefixed with the logger name.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Installs the subscriber.
    ///
    /// Keep the returned [`Logger`] alive: it owns the background file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, bad
    ///   directives, or no enabled output.
    /// * [`LoggerError::Appender`] if the log directory cannot be used.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.env_filter()?;

        let mut layers = Vec::new();

        if self.console {
            let console = layer().with_writer(io::stderr);
            layers.push(match self.format {
                LogFormat::Compact => console.compact().boxed(),
                LogFormat::Json => console.json().boxed(),
            });
        }

        let guard = match &self.directory {
            Some(directory) => {
                fs::create_dir_all(directory).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("Failed to create {}", directory.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(self.rotation.clone())
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(self.max_files)
                    .build(directory)
                    .context("Creating rolling log file")?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file = layer().with_writer(writer).with_ansi(false);
                layers.push(match self.format {
                    LogFormat::Compact => file.boxed(),
                    LogFormat::Json => file.json().boxed(),
                });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "no output enabled; enable the console or set a directory".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { name: self.name, guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "logger name cannot be empty".into(),
                context: None,
            });
        }
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }
        Ok(())
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            Some(directives) => builder.parse(directives).map_err(|e| {
                LoggerError::InvalidConfiguration {
                    message: format!("invalid filter '{directives}': {e}").into(),
                    context: None,
                }
            }),
            None => Ok(builder.from_env_lossy()),
        }
    }
}

/// Handle to the installed subscriber.
///
/// Dropping it stops the background file writer, flushing what is buffered.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    name: String,
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring a subscriber named `name` (also the log file prefix).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            level: LevelFilter::WARN,
            directives: None,
            format: LogFormat::Compact,
            console: true,
            directory: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}
