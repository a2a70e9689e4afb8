use loadmap_logger::{LogFormat, Logger, LoggerBuilder, LoggingConfig};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_records_land_in_the_configured_directory() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let settings = LoggingConfig {
        level: "info".to_owned(),
        format: LogFormat::Json,
        directory: Some(log_dir.clone()),
    };

    let logger = LoggerBuilder::from_config("integration-file-logging", &settings)?
        .console(false)
        .init()?;
    assert_eq!(logger.name(), "integration-file-logging");

    tracing::info!(unit = "sql", domain = "PLATFORM", "resolved unit");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("resolved unit"), "log file should hold the record");
    assert!(contents.trim_start().starts_with('{'), "records should be JSON");

    Ok(())
}

#[test]
fn builder_defaults_to_console_only() {
    let builder = Logger::builder("loadmap");
    let rendered = format!("{builder:?}");
    assert!(rendered.contains("console: true"));
    assert!(rendered.contains("directory: None"));
}
