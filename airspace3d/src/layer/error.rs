//! Layer loading errors and the per-layer error record.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::error::ConfigurationError;

/// Failure of an external resource while loading a layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The resource could not be acquired from the provider.
    #[error("failed to acquire {resource_id}: {message}")]
    Acquire {
        resource_id: String,
        message: String,
    },

    /// The resource was acquired but never became ready.
    #[error("{resource_id} did not become ready: {message}")]
    Ready {
        resource_id: String,
        message: String,
    },

    /// The display surface already holds a layer for this resource.
    #[error("{resource_id} is already registered")]
    AlreadyRegistered { resource_id: String },
}

impl ResourceError {
    pub fn acquire(resource_id: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Acquire {
            resource_id: resource_id.into(),
            message: message.to_string(),
        }
    }

    pub fn ready(resource_id: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Ready {
            resource_id: resource_id.into(),
            message: message.to_string(),
        }
    }

    pub fn resource_id(&self) -> &str {
        match self {
            Self::Acquire { resource_id, .. }
            | Self::Ready { resource_id, .. }
            | Self::AlreadyRegistered { resource_id } => resource_id,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Acquire { .. } => ErrorKind::Acquire,
            Self::Ready { .. } => ErrorKind::Ready,
            Self::AlreadyRegistered { .. } => ErrorKind::Register,
        }
    }
}

/// Everything that can stop a single layer from loading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Stage at which a layer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Configuration,
    Acquire,
    Ready,
    Register,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Acquire => "acquire",
            ErrorKind::Ready => "ready",
            ErrorKind::Register => "register",
        };
        f.write_str(s)
    }
}

/// Opaque error record attached to a failed [`LoadOutcome`](super::LoadOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub resource_id: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn from_load_error(resource_id: &str, error: &LoadError) -> Self {
        let kind = match error {
            LoadError::Configuration(_) => ErrorKind::Configuration,
            LoadError::Resource(e) => e.kind(),
        };
        Self {
            resource_id: resource_id.to_string(),
            kind,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} stage): {}", self.resource_id, self.kind, self.message)
    }
}
