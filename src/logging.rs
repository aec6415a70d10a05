//! log4rs setup: append to a log file at a chosen level, or use a YAML config.

use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// Log line layout for the file logger.
pub const LOG_PATTERN: &str = "{d(%H:%M:%S%.3f)} {M} {l} {m}{n}";

/// Log level names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            // log has no level above error
            LogLevel::Error | LogLevel::Critical => LevelFilter::Error,
        }
    }
}

/// Build a config that appends to `log_file` at `level`.
pub fn file_config(log_file: &Path, level: LogLevel) -> Result<Config, Box<dyn Error>> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .append(true)
        .build(log_file)
        .map_err(|e| format!("Error opening log file {}: {e}", log_file.display()))?;

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(Root::builder().appender("file").build(level.into()))?;
    Ok(config)
}

/// Install the global logger.
///
/// With `log_config` the log4rs YAML file is used as is, otherwise
/// [`file_config`] for `log_file` and `level`.
pub fn init_logging(
    log_config: Option<&Path>,
    log_file: &Path,
    level: LogLevel,
) -> Result<(), Box<dyn Error>> {
    match log_config {
        Some(yaml) => log4rs::init_file(yaml, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {}: {e}", yaml.display()))?,
        None => {
            log4rs::init_config(file_config(log_file, level)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::Debug);
        assert_eq!(LevelFilter::from(LogLevel::Warning), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Critical), LevelFilter::Error);
    }

    #[test]
    fn test_file_config() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("output.log");
        let config = file_config(&log_file, LogLevel::Info).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Info);
        assert!(log_file.exists());
    }
}
