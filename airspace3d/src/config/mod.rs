//! User configuration.
//!
//! Settings live in an INI file under the platform config directory
//! (`~/.config/airspace3d/config.ini` on Linux). A missing file means
//! defaults. `[layer.<name>]` sections override the display metadata of the
//! built-in airspace layers.

mod file;
mod keys;

pub use file::{
    config_file_path, ConfigFile, ConfigFileError, PortalSettings, CONFIG_DIR_NAME,
    CONFIG_FILE_NAME, DEFAULT_PORTAL_URL,
};
pub use keys::{layer_entries, ConfigKey, ConfigKeyError, Setting, LAYER_SETTING_KEYS};
