//! External collaborators of the layer loader.
//!
//! Acquisition and readiness are separate, independently fallible steps:
//! a provider hands out a handle for a resource id, and the handle later
//! resolves to the loaded [`LayerSource`]. The display surface accepts only
//! fully decorated layers.

use std::future::Future;

use parking_lot::Mutex;
use tracing::debug;

use super::error::ResourceError;
use super::types::{DecoratedLayer, LayerSource};

/// Source of remote layer resources.
pub trait ResourceProvider {
    type Handle: ResourceHandle;

    /// Acquires a handle for `resource_id`.
    fn acquire(
        &self,
        resource_id: &str,
    ) -> impl Future<Output = Result<Self::Handle, ResourceError>>;
}

/// A resource that has been acquired but may not be loaded yet.
pub trait ResourceHandle {
    fn resource_id(&self) -> &str;

    /// Waits until the resource is loaded.
    fn ready(self) -> impl Future<Output = Result<LayerSource, ResourceError>>;
}

/// Map surface that displays registered layers.
///
/// Registration is append-only. A surface must reject a second layer for
/// the same resource id.
pub trait DisplaySurface {
    fn register(&self, layer: DecoratedLayer) -> Result<(), ResourceError>;
}

/// In-memory display surface.
#[derive(Debug, Default)]
pub struct MapSurface {
    layers: Mutex<Vec<DecoratedLayer>>,
}

impl MapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.lock().is_empty()
    }

    pub fn contains(&self, resource_id: &str) -> bool {
        self.layers
            .lock()
            .iter()
            .any(|l| l.resource_id == resource_id)
    }

    /// Registered resource ids in registration order.
    pub fn resource_ids(&self) -> Vec<String> {
        self.layers
            .lock()
            .iter()
            .map(|l| l.resource_id.clone())
            .collect()
    }

    pub fn layer(&self, resource_id: &str) -> Option<DecoratedLayer> {
        self.layers
            .lock()
            .iter()
            .find(|l| l.resource_id == resource_id)
            .cloned()
    }

    /// Copy of every registered layer.
    pub fn snapshot(&self) -> Vec<DecoratedLayer> {
        self.layers.lock().clone()
    }
}

impl DisplaySurface for MapSurface {
    fn register(&self, layer: DecoratedLayer) -> Result<(), ResourceError> {
        let mut layers = self.layers.lock();
        if layers.iter().any(|l| l.resource_id == layer.resource_id) {
            return Err(ResourceError::AlreadyRegistered {
                resource_id: layer.resource_id,
            });
        }
        debug!(resource_id = %layer.resource_id, title = %layer.title, "Layer registered");
        layers.push(layer);
        Ok(())
    }
}
