//! Process-wide catalog of normalization rules.
//!
//! The catalog is built once on first access and is read-only afterwards.
//! Consumers hold `&ExpressionCatalog` and look rules up by their configured
//! name; an unregistered name is a [`ConfigurationError`].

use std::sync::OnceLock;

use tracing::debug;

use super::feature::FeatureAttributes;
use super::rules::{builtin_rules, NormalizationRule, RuleId};
use crate::error::ConfigurationError;

static CATALOG: OnceLock<ExpressionCatalog> = OnceLock::new();

/// Read-only mapping from rule name to rule.
#[derive(Debug)]
pub struct ExpressionCatalog {
    rules: [NormalizationRule; 3],
}

impl ExpressionCatalog {
    /// The shared catalog, built on first call.
    pub fn global() -> &'static ExpressionCatalog {
        CATALOG.get_or_init(|| {
            let catalog = ExpressionCatalog {
                rules: builtin_rules(),
            };
            debug!(rules = catalog.rules.len(), "Expression catalog initialized");
            catalog
        })
    }

    /// Looks up a rule by its configured name.
    pub fn lookup(&self, name: &str) -> Result<&NormalizationRule, ConfigurationError> {
        let id: RuleId = name.parse()?;
        Ok(self.rule(id))
    }

    /// The rule for an already-validated identifier.
    pub fn rule(&self, id: RuleId) -> &NormalizationRule {
        &self.rules[id.index()]
    }

    /// All rules in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = &NormalizationRule> {
        self.rules.iter()
    }

    /// Evaluates the named rule against a feature.
    pub fn evaluate(
        &self,
        name: &str,
        attributes: &FeatureAttributes,
    ) -> Result<f64, ConfigurationError> {
        Ok(self.lookup(name)?.evaluate(attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_is_shared() {
        let a = ExpressionCatalog::global();
        let b = ExpressionCatalog::global();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = ExpressionCatalog::global();
        let rule = catalog.lookup("LowerValueAsMeters").unwrap();
        assert_eq!(rule.id(), RuleId::LowerValueAsMeters);
        assert!(rule.expression().contains("SFC"));
    }

    #[test]
    fn test_lookup_unknown_name_is_configuration_error() {
        let catalog = ExpressionCatalog::global();
        let err = catalog.lookup("UpperValueAsFeet").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownRule("UpperValueAsFeet".to_string())
        );
    }

    #[test]
    fn test_rules_in_declaration_order() {
        let names: Vec<_> = ExpressionCatalog::global().rules().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["UpperValueAsMeters", "LowerValueAsMeters", "AltitudeValueAsMeters"]
        );
    }

    #[test]
    fn test_evaluate_by_name() {
        let attrs = FeatureAttributes::new()
            .with("LOWER_VAL", 40_i64)
            .with("LOWER_UOM", "FL")
            .with("LOWER_CODE", "STD");
        let meters = ExpressionCatalog::global()
            .evaluate("LowerValueAsMeters", &attrs)
            .unwrap();
        assert!((meters - 4_000.0 * 0.3048).abs() < 1e-9);
    }
}
