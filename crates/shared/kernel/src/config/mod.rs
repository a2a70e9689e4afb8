use crate::configuration::Configuration;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Custom error type for config loading.
#[loadmap_derive::loadmap_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Environment prefix for settings overrides (`LOADMAP__LOGGING__LEVEL=debug`).
pub const ENV_PREFIX: &str = "LOADMAP";

/// Loads settings from an optional file overlaid with environment variables.
///
/// Layers, lowest precedence first:
/// 1. **File**: `path`, when given; the format follows the extension (`.toml`, `.json`, ...).
/// 2. **Environment**: variables prefixed with `LOADMAP__`, nested keys separated by `__`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or malformed, or if the merged
/// values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use loadmap_kernel::config::load_config;
/// use loadmap_domain::config::LoadmapConfig;
///
/// let cfg: LoadmapConfig = load_config(None::<&str>).unwrap_or_default();
/// assert!(!cfg.logging.level.is_empty());
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = &path {
        let path: &Path = path.as_ref();
        info!("Loading settings from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build settings")?
        .try_deserialize::<T>()
        .context("Failed to deserialize settings")?;

    Ok(config)
}

/// Loads a unit [`Configuration`] from a file (no environment overlay).
///
/// The file holds a `units` array; each entry has a `name` and optional `requires`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file cannot be read or parsed, or if the units
/// fail validation (malformed or duplicate names).
pub fn load_configuration(path: impl AsRef<Path>) -> Result<Configuration, ConfigError> {
    let path = path.as_ref();
    info!("Loading unit configuration from {}", path.display());

    let configuration = Config::builder()
        .add_source(File::from(path).required(true))
        .build()
        .context("Failed to read unit configuration")?
        .try_deserialize::<Configuration>()
        .context("Invalid unit configuration")?;

    Ok(configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadmap_domain::config::{LoadmapConfig, LogFormat};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_settings_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loadmap.toml");
        fs::write(&path, "[logging]\nlevel = \"debug\"\nformat = \"json\"\n").unwrap();

        let cfg: LoadmapConfig = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result: Result<LoadmapConfig, _> = load_config(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Config { context: Some(_), .. })));
    }

    #[test]
    fn loads_unit_configuration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("units.toml");
        fs::write(
            &path,
            "[[units]]\nname = \"demo.app\"\nrequires = [\"sql\"]\n\n[[units]]\nname = \"sql\"\n",
        )
        .unwrap();

        let cf = load_configuration(&path).unwrap();
        assert_eq!(cf.len(), 2);
        assert_eq!(cf.find("demo.app").unwrap().requires()[0].as_str(), "sql");
    }

    #[test]
    fn duplicate_units_in_file_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("units.toml");
        fs::write(&path, "[[units]]\nname = \"sql\"\n\n[[units]]\nname = \"sql\"\n").unwrap();

        assert!(load_configuration(&path).is_err());
    }
}
