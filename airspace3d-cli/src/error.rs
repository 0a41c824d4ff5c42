//! CLI error type.

use std::fmt;

use airspace3d::app::AppError;
use airspace3d::config::ConfigFileError;
use airspace3d::ConfigurationError;

/// Errors reported by CLI commands. Every variant exits non-zero.
#[derive(Debug)]
pub enum CliError {
    /// Invalid configuration key, value or file.
    Config(String),

    /// Bad command-line input.
    Usage(String),

    /// Rule or layer configuration error.
    Configuration(ConfigurationError),

    /// One or more layers failed to load.
    LoadFailed { failed: usize, total: usize },

    /// The async runtime could not be created.
    Runtime(std::io::Error),

    /// Output could not be serialized.
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::Configuration(e) => write!(f, "{}", e),
            CliError::LoadFailed { failed, total } => {
                write!(f, "{} of {} layers failed to load", failed, total)
            }
            CliError::Runtime(e) => write!(f, "Failed to create Tokio runtime: {}", e),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ConfigurationError> for CliError {
    fn from(e: ConfigurationError) -> Self {
        CliError::Configuration(e)
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Config(e) => e.into(),
            AppError::Layers(e) => CliError::LoadFailed {
                failed: e.report().failed(),
                total: e.report().total(),
            },
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
