use serde::Deserialize;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level settings for the loadmap tooling.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoadmapConfigInner {
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct LoadmapConfig {
    #[serde(flatten, default)]
    inner: Arc<LoadmapConfigInner>,
}

impl Deref for LoadmapConfig {
    type Target = LoadmapConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Output format of log records.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Logging settings consumed by the logger crate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    pub format: LogFormat,
    /// Also write rolling log files into this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), format: LogFormat::Compact, directory: None }
    }
}
