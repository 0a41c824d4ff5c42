//! Rewrites flat 2-D symbology into extruded 3-D symbology.
//!
//! The transformer never edits a renderer in place. It reads the loaded
//! renderer and builds a new one, so category values, labels, order and
//! colours carry over unchanged and any legend built from the original stays
//! accurate.
//!
//! | Policy                | Renderer     | Symbol rewrite          | Visual variable                   |
//! |-----------------------|--------------|-------------------------|-----------------------------------|
//! | `SingleExtrude`       | simple       | polygon-3d / extrude    | size, meters, catalog rule        |
//! | `PerCategoryExtrude`  | unique-value | polygon-3d / extrude    | size, meters, catalog rule (once) |
//! | `PerCategoryLinePath` | unique-value | line-3d / quad path     | width, nautical miles, field * 0.5 |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::renderer::{
    LinearUnit, Renderer, UniqueValueInfo, ValueExpression, ValueRepresentation, VisualVariable,
};
use super::symbol::{
    EdgeKind, Edges, LineCap, LineJoin, Material, PathProfile, ProfileRotation, Symbol,
    SymbolLayer3d,
};
use crate::altitude::RuleId;
use crate::error::ConfigurationError;

/// Route width field; half of it sizes the swept path.
pub const ROUTE_WIDTH_FIELD: &str = "WIDTHRIGHT";

/// Scale applied to [`ROUTE_WIDTH_FIELD`].
pub const ROUTE_WIDTH_FACTOR: f64 = 0.5;

/// Default edge width for extruded volumes.
pub const DEFAULT_EDGE_SIZE: f64 = 2.5;

/// How a layer's symbols are rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPolicy {
    SingleExtrude,
    PerCategoryExtrude,
    PerCategoryLinePath,
}

impl SymbolPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            SymbolPolicy::SingleExtrude => "SingleExtrude",
            SymbolPolicy::PerCategoryExtrude => "PerCategoryExtrude",
            SymbolPolicy::PerCategoryLinePath => "PerCategoryLinePath",
        }
    }

    /// Whether the policy extrudes polygons and needs a size rule.
    pub fn is_extrusion(&self) -> bool {
        !matches!(self, SymbolPolicy::PerCategoryLinePath)
    }
}

impl fmt::Display for SymbolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymbolPolicy {
    type Err = ConfigurationError;

    /// Accepts `SingleExtrude` or `single-extrude` style tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "singleextrude" => Ok(SymbolPolicy::SingleExtrude),
            "percategoryextrude" => Ok(SymbolPolicy::PerCategoryExtrude),
            "percategorylinepath" => Ok(SymbolPolicy::PerCategoryLinePath),
            _ => Err(ConfigurationError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Where an extrusion takes its fill colour from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialSource {
    /// The colour of the symbol being replaced.
    Original,
    /// A fixed colour, e.g. transparent for outline-only volumes.
    Fixed(Color),
}

/// Accent edges drawn on extruded volumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub color: Color,
    pub size: f64,
}

impl EdgeStyle {
    pub fn new(color: Color, size: f64) -> Self {
        Self { color, size }
    }
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self::new(Color::WHITE, DEFAULT_EDGE_SIZE)
    }
}

/// Styling applied by the extrusion policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtrusionStyle {
    pub edges: EdgeStyle,
    pub material: MaterialSource,
}

impl Default for ExtrusionStyle {
    fn default() -> Self {
        Self {
            edges: EdgeStyle::default(),
            material: MaterialSource::Original,
        }
    }
}

/// Builds extruded renderers from loaded 2-D renderers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolTransformer {
    style: ExtrusionStyle,
}

impl SymbolTransformer {
    pub fn new(style: ExtrusionStyle) -> Self {
        Self { style }
    }

    /// Returns the 3-D equivalent of `renderer` under `policy`.
    ///
    /// `size_rule` drives the extrusion height and is required by the
    /// extrusion policies; the line-path policy ignores it.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] when the renderer shape does not fit the policy,
    /// an extrusion policy has no size rule, or a symbol has no colour.
    pub fn extrude(
        &self,
        renderer: &Renderer,
        policy: SymbolPolicy,
        size_rule: Option<RuleId>,
    ) -> Result<Renderer, ConfigurationError> {
        match (policy, renderer) {
            (SymbolPolicy::SingleExtrude, Renderer::Simple { symbol, .. }) => {
                let size_rule = require_size_rule(policy, size_rule)?;
                Ok(Renderer::Simple {
                    symbol: self.extruded_symbol(symbol)?,
                    visual_variables: vec![height_variable(size_rule)],
                })
            }
            (
                SymbolPolicy::PerCategoryExtrude,
                Renderer::UniqueValue {
                    field,
                    default_symbol,
                    unique_value_infos,
                    ..
                },
            ) => {
                let size_rule = require_size_rule(policy, size_rule)?;
                Ok(Renderer::UniqueValue {
                    field: field.clone(),
                    default_symbol: default_symbol
                        .as_ref()
                        .map(|s| self.extruded_symbol(s))
                        .transpose()?,
                    unique_value_infos: rewrite_infos(unique_value_infos, |s| {
                        self.extruded_symbol(s)
                    })?,
                    visual_variables: vec![height_variable(size_rule)],
                })
            }
            (
                SymbolPolicy::PerCategoryLinePath,
                Renderer::UniqueValue {
                    field,
                    default_symbol,
                    unique_value_infos,
                    ..
                },
            ) => Ok(Renderer::UniqueValue {
                field: field.clone(),
                default_symbol: default_symbol.as_ref().map(path_symbol).transpose()?,
                unique_value_infos: rewrite_infos(unique_value_infos, path_symbol)?,
                visual_variables: vec![width_variable()],
            }),
            (policy, renderer) => Err(ConfigurationError::RendererMismatch {
                policy: policy.name(),
                renderer: renderer.kind(),
            }),
        }
    }

    fn extruded_symbol(&self, symbol: &Symbol) -> Result<Symbol, ConfigurationError> {
        let color = match self.style.material {
            MaterialSource::Original => symbol_color(symbol)?,
            MaterialSource::Fixed(color) => color,
        };
        Ok(Symbol::Polygon3d {
            symbol_layers: vec![SymbolLayer3d::Extrude {
                material: Material { color },
                edges: Some(Edges {
                    kind: EdgeKind::Solid,
                    color: self.style.edges.color,
                    size: self.style.edges.size,
                }),
            }],
        })
    }
}

fn require_size_rule(
    policy: SymbolPolicy,
    size_rule: Option<RuleId>,
) -> Result<RuleId, ConfigurationError> {
    size_rule.ok_or(ConfigurationError::MissingSizeRule {
        policy: policy.name(),
    })
}

fn symbol_color(symbol: &Symbol) -> Result<Color, ConfigurationError> {
    symbol.color().ok_or_else(|| ConfigurationError::InvalidValue {
        field: "symbol".to_string(),
        reason: format!("{} symbol has no colour", symbol.kind()),
    })
}

fn rewrite_infos<F>(
    infos: &[UniqueValueInfo],
    mut rewrite: F,
) -> Result<Vec<UniqueValueInfo>, ConfigurationError>
where
    F: FnMut(&Symbol) -> Result<Symbol, ConfigurationError>,
{
    infos
        .iter()
        .map(|info| {
            Ok(UniqueValueInfo {
                value: info.value.clone(),
                label: info.label.clone(),
                symbol: rewrite(&info.symbol)?,
            })
        })
        .collect()
}

fn path_symbol(symbol: &Symbol) -> Result<Symbol, ConfigurationError> {
    Ok(Symbol::Line3d {
        symbol_layers: vec![SymbolLayer3d::Path {
            profile: PathProfile::Quad,
            profile_rotation: ProfileRotation::All,
            join: LineJoin::Round,
            cap: LineCap::Round,
            material: Material {
                color: symbol_color(symbol)?,
            },
        }],
    })
}

fn height_variable(rule: RuleId) -> VisualVariable {
    VisualVariable::Size {
        value_unit: LinearUnit::Meters,
        value_representation: None,
        value_expression: ValueExpression::rule(rule),
    }
}

fn width_variable() -> VisualVariable {
    VisualVariable::Size {
        value_unit: LinearUnit::NauticalMiles,
        value_representation: Some(ValueRepresentation::Width),
        value_expression: ValueExpression::FieldScaled {
            field: ROUTE_WIDTH_FIELD.to_string(),
            factor: ROUTE_WIDTH_FACTOR,
        },
    }
}
