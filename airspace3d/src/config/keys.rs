//! Settable configuration keys.
//!
//! A [`Setting`] addresses either a global key (`portal.url`) or one entry
//! of a layer override section (`layer.class-airspace.opacity`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use super::file::{parse_layer_key, ConfigFile, ConfigFileError, LAYER_SECTION_PREFIX};
use crate::layer::{default_airspace_layers, LayerOverride};
use crate::logging::DEFAULT_LOG_LEVEL;

/// Keys of a `[layer.<name>]` section, in file order.
pub const LAYER_SETTING_KEYS: [&str; 7] = [
    "title",
    "visible",
    "opacity",
    "labels_visible",
    "elevation_rule",
    "size_rule",
    "policy",
];

/// Accepted values for `logging.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Errors from `ConfigKey` parsing and assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigKeyError {
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("unknown layer '{0}'")]
    UnknownLayer(String),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// A `section.key` setting exposed to the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    PortalUrl,
    LoggingLevel,
    LoggingDirectory,
}

impl ConfigKey {
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::PortalUrl,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingDirectory,
        ]
    }

    /// Full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::PortalUrl => "portal.url",
            ConfigKey::LoggingLevel => "logging.level",
            ConfigKey::LoggingDirectory => "logging.directory",
        }
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::PortalUrl => "portal",
            ConfigKey::LoggingLevel | ConfigKey::LoggingDirectory => "logging",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::PortalUrl => "url",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingDirectory => "directory",
        }
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::PortalUrl => config.portal.url.clone(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validates and stores `value`. An empty directory clears it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        let value = value.trim();
        match self {
            ConfigKey::PortalUrl => {
                if !(value.starts_with("https://") || value.starts_with("http://")) {
                    return Err(self.invalid("must be an http(s) URL"));
                }
                config.portal.url = value.trim_end_matches('/').to_string();
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(&format!("expected one of {}", LOG_LEVELS.join(", "))));
                }
                config.logging.level = level;
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = (!value.is_empty()).then(|| PathBuf::from(value));
            }
        }
        Ok(())
    }

    /// Restores the built-in value.
    pub fn reset(&self, config: &mut ConfigFile) {
        let defaults = ConfigFile::default();
        match self {
            ConfigKey::PortalUrl => config.portal = defaults.portal,
            ConfigKey::LoggingLevel => config.logging.level = DEFAULT_LOG_LEVEL.to_string(),
            ConfigKey::LoggingDirectory => config.logging.directory = None,
        }
    }

    fn invalid(&self, reason: &str) -> ConfigKeyError {
        ConfigKeyError::InvalidValue {
            key: self.name(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

/// A global key or a single layer override entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    Global(ConfigKey),
    Layer { layer: String, key: &'static str },
}

impl Setting {
    /// INI section holding the setting.
    pub fn section(&self) -> String {
        match self {
            Setting::Global(key) => key.section().to_string(),
            Setting::Layer { layer, .. } => format!("{LAYER_SECTION_PREFIX}{layer}"),
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            Setting::Global(key) => key.key_name(),
            Setting::Layer { key, .. } => key,
        }
    }

    /// Layer the setting belongs to, if any.
    pub fn layer(&self) -> Option<&str> {
        match self {
            Setting::Global(_) => None,
            Setting::Layer { layer, .. } => Some(layer),
        }
    }

    /// Current value, `None` when unset.
    pub fn get(&self, config: &ConfigFile) -> Option<String> {
        match self {
            Setting::Global(key) => Some(key.get(config)).filter(|v| !v.is_empty()),
            Setting::Layer { layer, key } => config
                .layers
                .get(layer)
                .and_then(|o| layer_value(o, key)),
        }
    }

    /// Validates and stores `value`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigFileError> {
        match self {
            Setting::Global(key) => key.set(config, value)?,
            Setting::Layer { layer, key } => {
                let mut o = config.layers.get(layer).cloned().unwrap_or_default();
                parse_layer_key(&self.section(), key, value.trim(), &mut o)?;
                config.layers.insert(layer.clone(), o);
            }
        }
        Ok(())
    }

    /// Clears a layer entry or restores a global key to its default. A layer
    /// section left empty is removed.
    pub fn unset(&self, config: &mut ConfigFile) {
        match self {
            Setting::Global(key) => key.reset(config),
            Setting::Layer { layer, key } => {
                if let Some(o) = config.layers.get_mut(layer) {
                    clear_layer_value(o, key);
                    if *o == LayerOverride::default() {
                        config.layers.remove(layer);
                    }
                }
            }
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for Setting {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(rest) = s.strip_prefix(LAYER_SECTION_PREFIX) else {
            return s.parse().map(Setting::Global);
        };
        let (layer, key) = rest
            .rsplit_once('.')
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))?;
        let key = LAYER_SETTING_KEYS
            .into_iter()
            .find(|k| *k == key)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))?;
        if !default_airspace_layers().iter().any(|d| d.name == layer) {
            return Err(ConfigKeyError::UnknownLayer(layer.to_string()));
        }
        Ok(Setting::Layer {
            layer: layer.to_string(),
            key,
        })
    }
}

/// Set entries of a layer override, in [`LAYER_SETTING_KEYS`] order.
pub fn layer_entries(o: &LayerOverride) -> Vec<(&'static str, String)> {
    LAYER_SETTING_KEYS
        .into_iter()
        .filter_map(|key| layer_value(o, key).map(|value| (key, value)))
        .collect()
}

fn layer_value(o: &LayerOverride, key: &str) -> Option<String> {
    match key {
        "title" => o.title.clone(),
        "visible" => o.visible.map(|v| v.to_string()),
        "opacity" => o.opacity.map(|v| v.to_string()),
        "labels_visible" => o.labels_visible.map(|v| v.to_string()),
        "elevation_rule" => o.elevation_rule.clone(),
        "size_rule" => o.size_rule.clone(),
        "policy" => o.symbol_policy.map(|p| p.name().to_string()),
        _ => None,
    }
}

fn clear_layer_value(o: &mut LayerOverride, key: &str) {
    match key {
        "title" => o.title = None,
        "visible" => o.visible = None,
        "opacity" => o.opacity = None,
        "labels_visible" => o.labels_visible = None,
        "elevation_rule" => o.elevation_rule = None,
        "size_rule" => o.size_rule = None,
        "policy" => o.symbol_policy = None,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
            assert_eq!(key.name(), format!("{}.{}", key.section(), key.key_name()));
        }
        assert_eq!(
            "cache.size".parse::<ConfigKey>(),
            Err(ConfigKeyError::UnknownKey("cache.size".to_string()))
        );
    }

    #[test]
    fn test_set_and_get() {
        let mut config = ConfigFile::default();

        ConfigKey::PortalUrl
            .set(&mut config, "https://portal.example.com/")
            .unwrap();
        ConfigKey::LoggingLevel.set(&mut config, "DEBUG").unwrap();
        ConfigKey::LoggingDirectory
            .set(&mut config, "/tmp/logs")
            .unwrap();

        assert_eq!(ConfigKey::PortalUrl.get(&config), "https://portal.example.com");
        assert_eq!(ConfigKey::LoggingLevel.get(&config), "debug");
        assert_eq!(ConfigKey::LoggingDirectory.get(&config), "/tmp/logs");

        ConfigKey::LoggingDirectory.set(&mut config, "").unwrap();
        assert_eq!(ConfigKey::LoggingDirectory.get(&config), "");
    }

    #[test]
    fn test_parse_layer_settings() {
        let setting: Setting = "layer.class-airspace.opacity".parse().unwrap();
        assert_eq!(
            setting,
            Setting::Layer {
                layer: "class-airspace".to_string(),
                key: "opacity"
            }
        );
        assert_eq!(setting.to_string(), "layer.class-airspace.opacity");
        assert_eq!(
            "logging.level".parse::<Setting>(),
            Ok(Setting::Global(ConfigKey::LoggingLevel))
        );
        assert_eq!(
            "layer.heliports.title".parse::<Setting>(),
            Err(ConfigKeyError::UnknownLayer("heliports".to_string()))
        );
        assert!(matches!(
            "layer.class-airspace.colour".parse::<Setting>(),
            Err(ConfigKeyError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_every_layer_key_round_trips() {
        let values = [
            ("title", "Class B/C/D"),
            ("visible", "false"),
            ("opacity", "0.4"),
            ("labels_visible", "true"),
            ("elevation_rule", "LowerValueAsMeters"),
            ("size_rule", "UpperValueAsMeters"),
            ("policy", "PerCategoryExtrude"),
        ];
        let mut config = ConfigFile::default();

        for (key, value) in values {
            let setting: Setting = format!("layer.class-airspace.{key}").parse().unwrap();
            setting.set(&mut config, value).unwrap();
            assert_eq!(setting.get(&config).as_deref(), Some(value), "{key}");
        }

        let entries = layer_entries(&config.layers["class-airspace"]);
        assert_eq!(
            entries.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            LAYER_SETTING_KEYS
        );

        for key in LAYER_SETTING_KEYS {
            let setting: Setting = format!("layer.class-airspace.{key}").parse().unwrap();
            setting.unset(&mut config);
        }
        assert!(config.layers.is_empty());
    }

    #[test]
    fn test_layer_setting_is_validated() {
        let mut config = ConfigFile::default();
        let setting: Setting = "layer.ats-routes.size_rule".parse().unwrap();

        assert!(matches!(
            setting.set(&mut config, "HeightInFeet"),
            Err(ConfigFileError::Layer { .. })
        ));
        assert_eq!(setting.get(&config), None);
        assert!(config.layers.is_empty());
    }

    #[test]
    fn test_unset_restores_global_default() {
        let mut config = ConfigFile::default();
        let url = Setting::Global(ConfigKey::PortalUrl);
        url.set(&mut config, "https://portal.example.com").unwrap();

        url.unset(&mut config);

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut config = ConfigFile::default();
        assert!(ConfigKey::PortalUrl.set(&mut config, "ftp://x").is_err());
        assert!(ConfigKey::LoggingLevel.set(&mut config, "loud").is_err());
        assert_eq!(config, ConfigFile::default());
    }
}
