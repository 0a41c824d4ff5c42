//! Layer renderers and visual variables.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::symbol::Symbol;
use crate::altitude::{ExpressionCatalog, RuleId};

/// Linear unit for size visual variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinearUnit {
    Meters,
    Feet,
    NauticalMiles,
}

/// Which dimension of a symbol a size variable drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueRepresentation {
    Radius,
    Diameter,
    Area,
    Width,
    Distance,
}

/// Per-feature value feeding a visual variable or elevation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ValueExpression {
    /// A named catalog rule.
    Rule { rule: RuleId },
    /// `$feature.<field> * <factor>`, evaluated outside the catalog.
    FieldScaled { field: String, factor: f64 },
}

impl ValueExpression {
    pub fn rule(rule: RuleId) -> Self {
        ValueExpression::Rule { rule }
    }

    /// Arcade text for an external renderer.
    pub fn arcade(&self, catalog: &ExpressionCatalog) -> String {
        match self {
            ValueExpression::Rule { rule } => catalog.rule(*rule).expression().to_string(),
            ValueExpression::FieldScaled { field, factor } => {
                format!("$feature.{} * {}", field, factor)
            }
        }
    }
}

/// A rendering rule mapping a per-feature value to a visual property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VisualVariable {
    Size {
        #[serde(rename = "valueUnit")]
        value_unit: LinearUnit,
        #[serde(
            rename = "valueRepresentation",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        value_representation: Option<ValueRepresentation>,
        #[serde(rename = "valueExpression")]
        value_expression: ValueExpression,
    },
}

/// One category of a unique-value renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueValueInfo {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub symbol: Symbol,
}

/// How a layer draws its features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Renderer {
    /// One symbol for every feature.
    Simple {
        symbol: Symbol,
        #[serde(rename = "visualVariables", default)]
        visual_variables: Vec<VisualVariable>,
    },
    /// One symbol per discrete value of `field`.
    UniqueValue {
        field: String,
        #[serde(rename = "defaultSymbol", default, skip_serializing_if = "Option::is_none")]
        default_symbol: Option<Symbol>,
        #[serde(rename = "uniqueValueInfos")]
        unique_value_infos: Vec<UniqueValueInfo>,
        #[serde(rename = "visualVariables", default)]
        visual_variables: Vec<VisualVariable>,
    },
}

impl Renderer {
    pub fn kind(&self) -> &'static str {
        match self {
            Renderer::Simple { .. } => "simple",
            Renderer::UniqueValue { .. } => "unique-value",
        }
    }

    pub fn visual_variables(&self) -> &[VisualVariable] {
        match self {
            Renderer::Simple {
                visual_variables, ..
            }
            | Renderer::UniqueValue {
                visual_variables, ..
            } => visual_variables,
        }
    }

    /// Category values and their legend colours, in renderer order.
    ///
    /// A simple renderer reports its single symbol under an empty value.
    pub fn legend(&self) -> Vec<(&str, Option<Color>)> {
        match self {
            Renderer::Simple { symbol, .. } => vec![("", symbol.color())],
            Renderer::UniqueValue {
                unique_value_infos, ..
            } => unique_value_infos
                .iter()
                .map(|info| (info.value.as_str(), info.symbol.color()))
                .collect(),
        }
    }
}
