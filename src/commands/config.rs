//! Config command handler: show effective configuration.

use anyhow::Result;

use crate::app::config_runtime::{Settings, verbosity_label};
use crate::app_config::LoadedConfig;

pub(crate) fn run_config_show_command(settings: &Settings, loaded_config: &LoadedConfig) -> Result<()> {
    let resolved_path = loaded_config.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded_config.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("output_dir = {}", settings.output_dir.display());
    println!("extension = {}", settings.extension);
    println!("concurrency = {}", settings.concurrency);
    println!("connect_timeout_secs = {}", settings.connect_timeout_secs);
    println!("request_timeout_secs = {}", settings.request_timeout_secs);
    println!(
        "verbosity = {}",
        verbosity_label(settings.verbose, settings.quiet)
    );

    Ok(())
}
