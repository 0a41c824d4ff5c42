//! Application configuration.

use crate::auth::OfflineIdentity;
use crate::config::ConfigFile;
use crate::layer::{default_airspace_layers, LayerDescriptor};
use crate::logging::LoggingConfig;

use super::error::AppError;

/// Everything needed to bring the application up.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// ArcGIS portal the identity provider signs in against.
    pub portal_url: String,

    pub logging: LoggingConfig,

    /// Layers to load, in display order.
    pub layers: Vec<LayerDescriptor>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_config_file(&ConfigFile::default())
    }
}

impl AppConfig {
    /// Loads the user configuration file.
    pub fn load() -> Result<Self, AppError> {
        Ok(Self::from_config_file(&ConfigFile::load()?))
    }

    pub fn from_config_file(file: &ConfigFile) -> Self {
        Self {
            portal_url: file.portal.url.clone(),
            logging: file.logging.clone(),
            layers: file.layer_descriptors(),
        }
    }

    /// Identity provider for the configured portal when no interactive
    /// sign-in client is available.
    pub fn offline_identity(&self) -> OfflineIdentity {
        OfflineIdentity::new(&self.portal_url)
    }

    /// Replaces the layer set.
    pub fn with_layers(mut self, layers: Vec<LayerDescriptor>) -> Self {
        self.layers = layers;
        self
    }

    /// Whether the layer set is the built-in one, ignoring overrides.
    pub fn uses_default_layers(&self) -> bool {
        let defaults = default_airspace_layers();
        self.layers.len() == defaults.len()
            && self
                .layers
                .iter()
                .zip(&defaults)
                .all(|(a, b)| a.resource_id == b.resource_id)
    }
}
