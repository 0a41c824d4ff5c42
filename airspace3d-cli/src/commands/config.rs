//! `config` subcommands.
//!
//! Global keys (`portal.url`, `logging.level`) and layer override entries
//! (`layer.class-airspace.opacity`) are addressed the same way.

use std::fmt::Write as _;
use std::path::Path;

use clap::Subcommand;
use airspace3d::config::{config_file_path, ConfigFile, Setting};

use crate::error::CliError;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print a setting
    Get {
        /// `section.key` or `layer.<name>.<key>`
        key: String,
    },

    /// Change a setting
    Set {
        /// `section.key` or `layer.<name>.<key>` (e.g. layer.ats-routes.visible)
        key: String,
        value: String,
    },

    /// Clear a layer entry or restore a global default
    Unset { key: String },

    /// Print every setting
    List {
        /// Only the overrides of this layer
        #[arg(long)]
        layer: Option<String>,
    },

    /// Print the configuration file path
    Path,
}

pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let path = config_file_path();
    match command {
        ConfigCommands::Get { key } => {
            let setting = parse_setting(&key)?;
            let config = ConfigFile::load_from(&path)?;
            println!("{}", display_value(setting.get(&config).as_deref()));
        }
        ConfigCommands::Set { key, value } => {
            let setting = parse_setting(&key)?;
            let config = update(&path, |config| setting.set(config, &value))?;
            println!("{} = {}", setting, display_value(setting.get(&config).as_deref()));
        }
        ConfigCommands::Unset { key } => {
            let setting = parse_setting(&key)?;
            let config = update(&path, |config| {
                setting.unset(config);
                Ok(())
            })?;
            println!("{} = {}", setting, display_value(setting.get(&config).as_deref()));
        }
        ConfigCommands::List { layer } => {
            let config = ConfigFile::load_from(&path)?;
            print!("{}", render_settings(&config, layer.as_deref()));
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}

fn parse_setting(key: &str) -> Result<Setting, CliError> {
    key.parse().map_err(|e| {
        CliError::Config(format!(
            "{e}. Use 'airspace3d config list' to see the settings in use"
        ))
    })
}

fn update<F>(path: &Path, change: F) -> Result<ConfigFile, CliError>
where
    F: FnOnce(&mut ConfigFile) -> Result<(), airspace3d::config::ConfigFileError>,
{
    let mut config = ConfigFile::load_from(path)?;
    change(&mut config)?;
    config.save_to(path)?;
    Ok(config)
}

fn display_value(value: Option<&str>) -> &str {
    value.unwrap_or("(not set)")
}

/// Renders settings grouped by INI section, optionally limited to one layer.
fn render_settings(config: &ConfigFile, layer: Option<&str>) -> String {
    let mut out = String::new();
    let mut section = String::new();

    for (setting, value) in config.settings() {
        if layer.is_some() && setting.layer() != layer {
            continue;
        }
        if setting.section() != section {
            if !section.is_empty() {
                out.push('\n');
            }
            section = setting.section();
            let _ = writeln!(out, "[{section}]");
        }
        let _ = writeln!(
            out,
            "  {} = {}",
            setting.key_name(),
            display_value(value.as_deref())
        );
    }
    out
}
