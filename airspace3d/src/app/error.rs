//! Application error types.

use std::fmt;

use crate::config::ConfigFileError;
use crate::orchestrator::OrchestratorError;

/// Errors that can occur while bringing the application up.
#[derive(Debug)]
pub enum AppError {
    /// The configuration file could not be loaded.
    Config(ConfigFileError),

    /// One or more layers failed to load.
    Layers(OrchestratorError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Layers(e) => write!(f, "Layer initialization failed: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Layers(e) => Some(e),
        }
    }
}

impl From<ConfigFileError> for AppError {
    fn from(e: ConfigFileError) -> Self {
        AppError::Config(e)
    }
}

impl From<OrchestratorError> for AppError {
    fn from(e: OrchestratorError) -> Self {
        AppError::Layers(e)
    }
}
