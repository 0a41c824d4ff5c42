//! Layer loading command.
//!
//! Runs the view-ready sequence against `<resource_id>.json` documents in a
//! local directory instead of a portal, on a single-threaded runtime.

use std::path::Path;

use tracing::debug;

use airspace3d::app::{AirspaceApp, AppConfig, AppError};
use airspace3d::auth::LogView;
use airspace3d::layer::{FileResourceProvider, LoadStatus, MapSurface};
use airspace3d::orchestrator::AggregateReport;

use crate::error::CliError;

/// Load every configured layer from `source` and print the outcomes.
pub fn run(source: &Path, json: bool) -> Result<(), CliError> {
    if !source.is_dir() {
        return Err(CliError::Usage(format!(
            "source directory not found: {}",
            source.display()
        )));
    }

    let config = AppConfig::load()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(CliError::Runtime)?;

    let identity = config.offline_identity();
    let app = AirspaceApp::new(
        config,
        identity,
        LogView,
        FileResourceProvider::new(source),
        MapSurface::new(),
    );

    debug!(source = %source.display(), "Loading layers");
    let result = runtime.block_on(app.view_ready());

    let report = match &result {
        Ok(ready) => Some(&ready.layers),
        Err(AppError::Layers(e)) => Some(e.report()),
        Err(AppError::Config(_)) => None,
    };

    if let Some(report) = report {
        if json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            print_report(report);
        }
    }

    result.map(|_| ()).map_err(CliError::from)
}

fn print_report(report: &AggregateReport) {
    for outcome in &report.outcomes {
        match (&outcome.status, &outcome.error) {
            (LoadStatus::Loaded, _) => println!("  loaded  {}", outcome.resource_id),
            (LoadStatus::Failed, Some(error)) => {
                println!("  FAILED  {} [{}] {}", outcome.resource_id, error.kind, error.message)
            }
            (LoadStatus::Failed, None) => println!("  FAILED  {}", outcome.resource_id),
        }
    }
    println!();
    println!("{} of {} layers loaded", report.loaded(), report.total());
}
