//! Static layer descriptors.
//!
//! A descriptor names the remote resource to load and how to decorate it.
//! Rule names are kept as configured text and resolved against the
//! expression catalog when the layer loads, so a typo surfaces as a
//! [`ConfigurationError`] for that layer only.

use serde::Serialize;

use crate::altitude::{ExpressionCatalog, RuleId};
use crate::error::ConfigurationError;
use crate::symbology::{Color, EdgeStyle, ExtrusionStyle, MaterialSource, SymbolPolicy};

/// FAA Airspace Boundary portal item.
pub const AIRSPACE_BOUNDARY_ITEM: &str = "cc6ce24755e048efb555d4527bd82cc5";

/// FAA Class Airspace portal item.
pub const CLASS_AIRSPACE_ITEM: &str = "02acaa96762c48b5a5db8a3e0eafee2b";

/// FAA Special Use Airspace portal item.
pub const SPECIAL_USE_AIRSPACE_ITEM: &str = "ac3373e13b974f5a9e8f0d0b042d0247";

/// FAA ATS Route portal item.
pub const ATS_ROUTE_ITEM: &str = "ad8bd1984ef943e4b477490ea71d904e";

/// Static configuration of one managed layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerDescriptor {
    /// Short key used in configuration sections and logs.
    pub name: String,
    pub resource_id: String,
    pub elevation_rule: String,
    pub size_rule: Option<String>,
    pub symbol_policy: SymbolPolicy,
    pub display_title: String,
    pub initially_visible: bool,
    pub opacity: f64,
    pub labels_visible: bool,
    pub style: ExtrusionStyle,
}

/// Rule identifiers of a descriptor after catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRules {
    pub elevation: RuleId,
    pub size: Option<RuleId>,
}

/// Display overrides read from the configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerOverride {
    pub title: Option<String>,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub labels_visible: Option<bool>,
    pub elevation_rule: Option<String>,
    pub size_rule: Option<String>,
    pub symbol_policy: Option<SymbolPolicy>,
}

impl LayerDescriptor {
    /// Creates a visible, opaque descriptor with default extrusion style.
    pub fn new(
        name: impl Into<String>,
        resource_id: impl Into<String>,
        symbol_policy: SymbolPolicy,
        elevation_rule: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            display_title: name.clone(),
            name,
            resource_id: resource_id.into(),
            elevation_rule: elevation_rule.into(),
            size_rule: None,
            symbol_policy,
            initially_visible: true,
            opacity: 1.0,
            labels_visible: true,
            style: ExtrusionStyle::default(),
        }
    }

    pub fn with_size_rule(mut self, rule: impl Into<String>) -> Self {
        self.size_rule = Some(rule.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.display_title = title.into();
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.initially_visible = visible;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_labels_visible(mut self, labels_visible: bool) -> Self {
        self.labels_visible = labels_visible;
        self
    }

    pub fn with_edges(mut self, edges: EdgeStyle) -> Self {
        self.style.edges = edges;
        self
    }

    pub fn with_material(mut self, material: MaterialSource) -> Self {
        self.style.material = material;
        self
    }

    /// Resolves rule names against the catalog and checks value ranges.
    pub fn resolve(&self, catalog: &ExpressionCatalog) -> Result<ResolvedRules, ConfigurationError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigurationError::InvalidValue {
                field: format!("{}.opacity", self.name),
                reason: format!("{} is outside 0.0..=1.0", self.opacity),
            });
        }

        let elevation = catalog.lookup(&self.elevation_rule)?.id();
        let size = match &self.size_rule {
            Some(name) => Some(catalog.lookup(name)?.id()),
            None if self.symbol_policy.is_extrusion() => {
                return Err(ConfigurationError::MissingSizeRule {
                    policy: self.symbol_policy.name(),
                })
            }
            None => None,
        };

        Ok(ResolvedRules { elevation, size })
    }

    /// Returns a copy with configured overrides applied.
    pub fn with_override(&self, o: &LayerOverride) -> Self {
        let mut d = self.clone();
        if let Some(title) = &o.title {
            d.display_title = title.clone();
        }
        if let Some(visible) = o.visible {
            d.initially_visible = visible;
        }
        if let Some(opacity) = o.opacity {
            d.opacity = opacity;
        }
        if let Some(labels) = o.labels_visible {
            d.labels_visible = labels;
        }
        if let Some(rule) = &o.elevation_rule {
            d.elevation_rule = rule.clone();
        }
        if let Some(rule) = &o.size_rule {
            d.size_rule = Some(rule.clone());
        }
        if let Some(policy) = o.symbol_policy {
            d.symbol_policy = policy;
        }
        d
    }
}

/// The FAA airspace layers shown by the application.
///
/// Polygon layers sit on `LowerValueAsMeters` and extrude by
/// `UpperValueAsMeters`; routes sit on `AltitudeValueAsMeters` and are swept
/// by their published width.
pub fn default_airspace_layers() -> Vec<LayerDescriptor> {
    let lower = RuleId::LowerValueAsMeters.name();
    let upper = RuleId::UpperValueAsMeters.name();

    vec![
        LayerDescriptor::new(
            "airspace-boundary",
            AIRSPACE_BOUNDARY_ITEM,
            SymbolPolicy::SingleExtrude,
            lower,
        )
        .with_size_rule(upper)
        .with_title("US Airspace Boundary")
        .with_visible(false)
        .with_edges(EdgeStyle::new(Color::rgb(0x9e, 0xdb, 0x9e), 2.5))
        .with_material(MaterialSource::Fixed(Color::TRANSPARENT)),
        LayerDescriptor::new(
            "class-airspace",
            CLASS_AIRSPACE_ITEM,
            SymbolPolicy::PerCategoryExtrude,
            lower,
        )
        .with_size_rule(upper)
        .with_title("US Airspace")
        .with_opacity(0.5)
        .with_labels_visible(false)
        .with_edges(EdgeStyle::new(Color::WHITE, 2.5)),
        LayerDescriptor::new(
            "special-use-airspace",
            SPECIAL_USE_AIRSPACE_ITEM,
            SymbolPolicy::SingleExtrude,
            lower,
        )
        .with_size_rule(upper)
        .with_title("US Special Use Airspace")
        .with_visible(false)
        .with_opacity(0.5)
        .with_edges(EdgeStyle::new(Color::DARK_RED, 2.5)),
        LayerDescriptor::new(
            "ats-routes",
            ATS_ROUTE_ITEM,
            SymbolPolicy::PerCategoryLinePath,
            RuleId::AltitudeValueAsMeters.name(),
        )
        .with_title("US ATS Routes")
        .with_visible(false)
        .with_opacity(0.5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layers_resolve() {
        let catalog = ExpressionCatalog::global();
        for descriptor in default_airspace_layers() {
            let rules = descriptor.resolve(catalog).unwrap();
            if descriptor.symbol_policy.is_extrusion() {
                assert_eq!(rules.elevation, RuleId::LowerValueAsMeters);
                assert_eq!(rules.size, Some(RuleId::UpperValueAsMeters));
            } else {
                assert_eq!(rules.elevation, RuleId::AltitudeValueAsMeters);
                assert_eq!(rules.size, None);
            }
        }
    }

    #[test]
    fn test_default_layer_names_are_unique() {
        let layers = default_airspace_layers();
        let mut names: Vec<_> = layers.iter().map(|d| d.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), layers.len());
    }

    #[test]
    fn test_unknown_rule_is_configuration_error() {
        let descriptor = LayerDescriptor::new("x", "id", SymbolPolicy::SingleExtrude, "Nope")
            .with_size_rule("UpperValueAsMeters");
        assert_eq!(
            descriptor.resolve(ExpressionCatalog::global()),
            Err(ConfigurationError::UnknownRule("Nope".to_string()))
        );
    }

    #[test]
    fn test_extrusion_without_size_rule() {
        let descriptor = LayerDescriptor::new(
            "x",
            "id",
            SymbolPolicy::PerCategoryExtrude,
            "LowerValueAsMeters",
        );
        assert!(matches!(
            descriptor.resolve(ExpressionCatalog::global()),
            Err(ConfigurationError::MissingSizeRule { .. })
        ));
    }

    #[test]
    fn test_opacity_out_of_range() {
        let descriptor = LayerDescriptor::new(
            "x",
            "id",
            SymbolPolicy::PerCategoryLinePath,
            "AltitudeValueAsMeters",
        )
        .with_opacity(1.5);
        assert!(matches!(
            descriptor.resolve(ExpressionCatalog::global()),
            Err(ConfigurationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_override_only_touches_set_fields() {
        let base = default_airspace_layers().remove(1);
        let over = LayerOverride {
            visible: Some(false),
            opacity: Some(0.8),
            ..Default::default()
        };
        let d = base.with_override(&over);
        assert!(!d.initially_visible);
        assert_eq!(d.opacity, 0.8);
        assert_eq!(d.display_title, base.display_title);
        assert_eq!(d.resource_id, base.resource_id);
        assert_eq!(d.style, base.style);
    }
}
