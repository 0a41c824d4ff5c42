//! Layer loading types.

use serde::{Deserialize, Serialize};

use super::error::ErrorInfo;
use crate::symbology::{Renderer, ValueExpression};

/// Final status of one layer load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Loaded,
    Failed,
}

/// Result of one [`LayerLoader::load`](super::LayerLoader::load) call.
///
/// Created once and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    pub resource_id: String,
    pub status: LoadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl LoadOutcome {
    pub fn loaded(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            status: LoadStatus::Loaded,
            error: None,
        }
    }

    pub fn failed(error: ErrorInfo) -> Self {
        Self {
            resource_id: error.resource_id.clone(),
            status: LoadStatus::Failed,
            error: Some(error),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.status == LoadStatus::Loaded
    }
}

/// How feature geometry is placed vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElevationMode {
    /// Z comes from the feature expression, measured from sea level.
    AbsoluteHeight,
}

/// Elevation configuration of a decorated layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevationInfo {
    pub mode: ElevationMode,
    pub expression: ValueExpression,
}

/// A layer as delivered by the resource provider once ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSource {
    /// Title stored with the resource, replaced by the descriptor title.
    #[serde(default)]
    pub title: Option<String>,
    /// Attribute field names published by the layer.
    #[serde(default)]
    pub fields: Vec<String>,
    pub renderer: Renderer,
}

/// A fully configured layer, ready for the display surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecoratedLayer {
    pub resource_id: String,
    pub title: String,
    pub visible: bool,
    pub opacity: f64,
    pub labels_visible: bool,
    pub elevation_info: ElevationInfo,
    pub renderer: Renderer,
}
