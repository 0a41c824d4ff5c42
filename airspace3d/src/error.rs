//! Configuration errors shared across the crate.
//!
//! Raised for mistakes in static layer configuration, never for bad feature
//! data. Altitude rules are total and absorb malformed attributes.

use thiserror::Error;

/// Errors in static layer or rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The rule name is not registered in the expression catalog.
    #[error("unknown normalization rule '{0}'")]
    UnknownRule(String),

    /// The symbol policy token is not recognized.
    #[error("unknown symbol policy '{0}'")]
    UnknownPolicy(String),

    /// The policy cannot be applied to the layer's renderer.
    #[error("symbol policy {policy} cannot rewrite a {renderer} renderer")]
    RendererMismatch {
        policy: &'static str,
        renderer: &'static str,
    },

    /// An extrusion policy was configured without a size rule.
    #[error("symbol policy {policy} requires a size rule")]
    MissingSizeRule { policy: &'static str },

    /// A descriptor value is out of range or malformed.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigurationError::UnknownRule("HeightAsFeet".to_string());
        assert_eq!(err.to_string(), "unknown normalization rule 'HeightAsFeet'");

        let err = ConfigurationError::RendererMismatch {
            policy: "PerCategoryExtrude",
            renderer: "simple",
        };
        assert!(err.to_string().contains("PerCategoryExtrude"));
        assert!(err.to_string().contains("simple"));
    }
}
