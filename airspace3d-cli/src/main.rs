//! Airspace3D CLI - Command-line interface
//!
//! Inspects the altitude rules and layer configuration, and runs the
//! view-ready sequence against local layer documents.

mod commands;
mod error;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use airspace3d::config::ConfigFile;
use airspace3d::logging;

use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "airspace3d", version, about = "3-D aviation airspace layers")]
struct Cli {
    /// Log filter override (e.g. `debug`, `airspace3d=trace`)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the configured airspace layers
    Layers,

    /// List the altitude normalization rules
    Rules {
        /// Print the Arcade expression of each rule
        #[arg(long)]
        expressions: bool,
    },

    /// Evaluate an altitude rule against feature attributes
    Normalize {
        /// Rule name (e.g. UpperValueAsMeters)
        rule: String,

        /// Attributes as FIELD=VALUE (e.g. UPPER_VAL=180 UPPER_UOM=FL)
        #[arg(value_name = "FIELD=VALUE")]
        attributes: Vec<String>,
    },

    /// Load every layer from local JSON documents
    Load {
        /// Directory holding `<resource_id>.json` documents
        #[arg(long)]
        source: std::path::PathBuf,

        /// Print the outcome report as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging_config = ConfigFile::load().unwrap_or_default().logging;
    if let Some(level) = cli.log_level.clone() {
        logging_config.level = level;
    }
    let _guard = logging::init(&logging_config);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Layers => commands::layers::run(),
        Commands::Rules { expressions } => commands::rules::run(expressions),
        Commands::Normalize { rule, attributes } => commands::normalize::run(&rule, &attributes),
        Commands::Load { source, json } => commands::load::run(&source, json),
        Commands::Config { command } => commands::config::run(command),
    }
}
