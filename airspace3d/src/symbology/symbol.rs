//! 2-D and 3-D symbol definitions.
//!
//! The JSON shape follows the web-scene symbol vocabulary (`simple-fill`,
//! `polygon-3d`, `extrude`, `path`, ...) so that fixtures exported from a
//! map service deserialize directly.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Outline of a 2-D fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: Color,
    #[serde(default = "default_outline_width")]
    pub width: f64,
}

fn default_outline_width() -> f64 {
    0.75
}

/// A layer symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Symbol {
    #[serde(rename = "simple-fill")]
    SimpleFill {
        color: Color,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outline: Option<Outline>,
    },
    #[serde(rename = "simple-line")]
    SimpleLine {
        color: Color,
        #[serde(default = "default_outline_width")]
        width: f64,
    },
    #[serde(rename = "simple-marker")]
    SimpleMarker { color: Color, size: f64 },
    #[serde(rename = "polygon-3d")]
    Polygon3d {
        #[serde(rename = "symbolLayers")]
        symbol_layers: Vec<SymbolLayer3d>,
    },
    #[serde(rename = "line-3d")]
    Line3d {
        #[serde(rename = "symbolLayers")]
        symbol_layers: Vec<SymbolLayer3d>,
    },
}

impl Symbol {
    /// The colour that identifies this symbol in a legend.
    ///
    /// For 3-D symbols this is the material colour of the first symbol
    /// layer.
    pub fn color(&self) -> Option<Color> {
        match self {
            Symbol::SimpleFill { color, .. }
            | Symbol::SimpleLine { color, .. }
            | Symbol::SimpleMarker { color, .. } => Some(*color),
            Symbol::Polygon3d { symbol_layers } | Symbol::Line3d { symbol_layers } => {
                symbol_layers.first().map(SymbolLayer3d::material_color)
            }
        }
    }

    /// Short type name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Symbol::SimpleFill { .. } => "simple-fill",
            Symbol::SimpleLine { .. } => "simple-line",
            Symbol::SimpleMarker { .. } => "simple-marker",
            Symbol::Polygon3d { .. } => "polygon-3d",
            Symbol::Line3d { .. } => "line-3d",
        }
    }

    pub fn is_3d(&self) -> bool {
        matches!(self, Symbol::Polygon3d { .. } | Symbol::Line3d { .. })
    }
}

/// Fill material of a 3-D symbol layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
}

/// Edge rendering for extruded volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub color: Color,
    pub size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Solid,
    Sketch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathProfile {
    Circle,
    Quad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRotation {
    All,
    Heading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    Bevel,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Square,
    Round,
}

/// One layer of a 3-D symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SymbolLayer3d {
    /// Raises a polygon into a volume.
    Extrude {
        material: Material,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        edges: Option<Edges>,
    },
    /// Sweeps a profile along a line.
    Path {
        profile: PathProfile,
        #[serde(rename = "profileRotation")]
        profile_rotation: ProfileRotation,
        join: LineJoin,
        cap: LineCap,
        material: Material,
    },
}

impl SymbolLayer3d {
    pub fn material_color(&self) -> Color {
        match self {
            SymbolLayer3d::Extrude { material, .. } | SymbolLayer3d::Path { material, .. } => {
                material.color
            }
        }
    }
}
