//! Layer listing command.

use airspace3d::config::ConfigFile;

use crate::error::CliError;

/// Print the configured layers with overrides applied.
pub fn run() -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    for d in config.layer_descriptors() {
        println!("{} ({})", d.display_title, d.name);
        println!("  resource:  {}", d.resource_id);
        println!("  policy:    {}", d.symbol_policy);
        println!("  elevation: {}", d.elevation_rule);
        if let Some(size) = &d.size_rule {
            println!("  size:      {}", size);
        }
        println!(
            "  visible:   {}  opacity: {}  labels: {}",
            d.initially_visible, d.opacity, d.labels_visible
        );
    }

    Ok(())
}
