//! CLI command routing: runs the selected subcommand and returns its exit outcome.

use anyhow::Result;

use crate::app::config_runtime::Settings;
use crate::app_config::LoadedConfig;
use crate::cli::Command;
use crate::{ProcessExit, commands};

pub(crate) async fn dispatch(
    command: &Command,
    settings: &Settings,
    loaded_config: &LoadedConfig,
) -> Result<ProcessExit> {
    match command {
        Command::Fetch(args) => commands::run_fetch_command(args, settings).await,
        Command::Run(args) => commands::run_pipeline_command(args, settings).await,
        Command::Dedupe => {
            commands::run_dedupe_command(settings)?;
            Ok(ProcessExit::Success)
        }
        Command::Classify => {
            commands::run_classify_command(settings)?;
            Ok(ProcessExit::Success)
        }
        Command::Metadata { file } => {
            commands::run_metadata_command(file)?;
            Ok(ProcessExit::Success)
        }
        Command::Split(args) => {
            commands::run_split_command(args)?;
            Ok(ProcessExit::Success)
        }
        Command::Config => {
            commands::run_config_show_command(settings, loaded_config)?;
            Ok(ProcessExit::Success)
        }
    }
}
