//! INI configuration file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::{debug, warn};

use super::keys::{layer_entries, ConfigKey, ConfigKeyError, Setting};
use crate::altitude::ExpressionCatalog;
use crate::error::ConfigurationError;
use crate::layer::{default_airspace_layers, LayerDescriptor, LayerOverride};
use crate::logging::LoggingConfig;
use crate::symbology::SymbolPolicy;

/// Default ArcGIS portal.
pub const DEFAULT_PORTAL_URL: &str = "https://www.arcgis.com";

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "airspace3d";

pub const CONFIG_FILE_NAME: &str = "config.ini";

pub(super) const LAYER_SECTION_PREFIX: &str = "layer.";

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for [{section}] {key}: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        reason: String,
    },

    #[error("[{section}]: {source}")]
    Layer {
        section: String,
        source: ConfigurationError,
    },

    #[error(transparent)]
    Key(#[from] ConfigKeyError),
}

/// Path of the user configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Portal settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalSettings {
    pub url: String,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_PORTAL_URL.to_string(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub portal: PortalSettings,
    pub logging: LoggingConfig,
    /// Display overrides keyed by layer name.
    pub layers: BTreeMap<String, LayerOverride>,
}

impl ConfigFile {
    /// Loads the user configuration file, or defaults when it does not exist.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Loads `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(source) => ConfigFileError::Read {
                path: path.to_path_buf(),
                source,
            },
            ini::Error::Parse(e) => ConfigFileError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;

        Self::from_ini(&ini)
    }

    /// Writes the user configuration file, creating its directory.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let write_err = |source| ConfigFileError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    /// Default layer descriptors with the configured overrides applied.
    ///
    /// Overrides naming an unknown layer are ignored with a warning.
    pub fn layer_descriptors(&self) -> Vec<LayerDescriptor> {
        let defaults = default_airspace_layers();
        for name in self.layers.keys() {
            if !defaults.iter().any(|d| &d.name == name) {
                warn!(layer = %name, "Override for unknown layer ignored");
            }
        }
        defaults
            .into_iter()
            .map(|d| match self.layers.get(&d.name) {
                Some(o) => d.with_override(o),
                None => d,
            })
            .collect()
    }

    /// Every global setting followed by the set entries of each layer
    /// override, with their current values.
    pub fn settings(&self) -> Vec<(Setting, Option<String>)> {
        let globals = ConfigKey::all().iter().map(|key| {
            let setting = Setting::Global(*key);
            let value = setting.get(self);
            (setting, value)
        });
        let layers = self.layers.iter().flat_map(|(layer, o)| {
            layer_entries(o).into_iter().map(move |(key, value)| {
                let setting = Setting::Layer {
                    layer: layer.clone(),
                    key,
                };
                (setting, Some(value))
            })
        });
        globals.chain(layers).collect()
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let mut config = Self::default();

        if let Some(url) = ini.get_from(Some("portal"), "url") {
            config.portal.url = url.trim().to_string();
        }
        if let Some(level) = ini.get_from(Some("logging"), "level") {
            config.logging.level = level.trim().to_string();
        }
        if let Some(dir) = ini.get_from(Some("logging"), "directory") {
            let dir = dir.trim();
            config.logging.directory = (!dir.is_empty()).then(|| PathBuf::from(dir));
        }

        for (section, props) in ini.iter() {
            let Some(section) = section else { continue };
            let Some(name) = section.strip_prefix(LAYER_SECTION_PREFIX) else {
                continue;
            };
            let mut o = LayerOverride::default();
            for (key, value) in props.iter() {
                parse_layer_key(section, key, value.trim(), &mut o)?;
            }
            config.layers.insert(name.to_string(), o);
        }

        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("portal")).set("url", &self.portal.url);
        ini.with_section(Some("logging")).set("level", &self.logging.level);
        if let Some(dir) = &self.logging.directory {
            ini.with_section(Some("logging"))
                .set("directory", dir.to_string_lossy());
        }

        for (name, o) in &self.layers {
            let mut section = ini.with_section(Some(format!("{LAYER_SECTION_PREFIX}{name}")));
            for (key, value) in layer_entries(o) {
                section.set(key, value);
            }
        }

        ini
    }
}

pub(super) fn parse_layer_key(
    section: &str,
    key: &str,
    value: &str,
    o: &mut LayerOverride,
) -> Result<(), ConfigFileError> {
    let invalid = |reason: String| ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    };
    let layer_err = |source| ConfigFileError::Layer {
        section: section.to_string(),
        source,
    };

    match key {
        "title" => o.title = Some(value.to_string()),
        "visible" => o.visible = Some(parse_bool(value).ok_or_else(|| invalid(bool_reason(value)))?),
        "labels_visible" => {
            o.labels_visible = Some(parse_bool(value).ok_or_else(|| invalid(bool_reason(value)))?)
        }
        "opacity" => {
            let opacity: f64 = value
                .parse()
                .map_err(|_| invalid(format!("'{value}' is not a number")))?;
            if !(0.0..=1.0).contains(&opacity) {
                return Err(invalid(format!("{opacity} is outside 0.0..=1.0")));
            }
            o.opacity = Some(opacity);
        }
        "elevation_rule" => {
            ExpressionCatalog::global().lookup(value).map_err(layer_err)?;
            o.elevation_rule = Some(value.to_string());
        }
        "size_rule" => {
            ExpressionCatalog::global().lookup(value).map_err(layer_err)?;
            o.size_rule = Some(value.to_string());
        }
        "policy" => o.symbol_policy = Some(SymbolPolicy::from_str(value).map_err(layer_err)?),
        _ => warn!(section, key, "Unknown layer setting ignored"),
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn bool_reason(value: &str) -> String {
    format!("'{value}' is not a boolean")
}
