//! Tracing subscriber setup.
//!
//! Console output always goes to stderr. When a log directory is configured,
//! a daily-rolling file is written as well through a non-blocking writer; the
//! returned [`WorkerGuard`] must be held until exit so buffered lines flush.

use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter directive when neither config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name prefix of rolled log files.
pub const LOG_FILE_PREFIX: &str = "airspace3d.log";

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `airspace3d=debug`.
    pub level: String,
    /// Directory for rolling log files; console only when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    /// Builds the filter. `RUST_LOG` wins over the configured level, and an
    /// unparsable level falls back to [`DEFAULT_LOG_LEVEL`].
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }
}

/// Opens the daily-rolling log file in `directory`, creating it if needed.
pub fn file_appender(directory: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(directory)
}

/// Installs the global subscriber.
///
/// Returns the file writer guard when file logging is enabled. A log
/// directory that cannot be opened is reported and logging continues on the
/// console only. Calling this twice leaves the first subscriber in place.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let appender = match config.directory.as_deref().map(file_appender) {
        Some(Ok(appender)) => Some(appender),
        Some(Err(e)) => {
            install_console(config);
            warn!(
                directory = ?config.directory,
                error = %e,
                "Log directory unavailable, logging to console only"
            );
            return None;
        }
        None => None,
    };

    match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let console = fmt::layer().with_writer(std::io::stderr).with_target(false);
            let file = fmt::layer().with_writer(writer).with_ansi(false);
            let installed = tracing_subscriber::registry()
                .with(config.env_filter())
                .with(console)
                .with(file)
                .try_init()
                .is_ok();
            installed.then_some(guard)
        }
        None => {
            install_console(config);
            None
        }
    }
}

fn install_console(config: &LoggingConfig) {
    let _ = tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.directory.is_none());
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = LoggingConfig {
            level: "not a [valid directive".to_string(),
            directory: None,
        };
        // Must not panic whatever RUST_LOG holds.
        let _ = config.env_filter();
    }

    #[test]
    fn test_file_appender_creates_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let logs = dir.path().join("logs");

        assert!(file_appender(&logs).is_ok());
        assert!(logs.is_dir());
    }

    #[test]
    fn test_file_appender_rejects_file_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(file_appender(&file.path().join("logs")).is_err());
    }

    #[test]
    fn test_init_with_unusable_directory_falls_back_to_console() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = LoggingConfig {
            level: "warn".to_string(),
            directory: Some(file.path().join("logs")),
        };

        assert!(init(&config).is_none());
    }
}
