//! CLI entry point for auto-fiddler.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app;
mod app_config;
mod cli;
mod commands;

use app::{command_dispatcher, config_runtime, terminal};
use cli::Cli;

/// Process exit outcome: 0 success, 1 some fetches failed, 2 every fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Partial,
    Failure,
}

impl ProcessExit {
    fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Failure => 2,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    match run(cli).await {
        Ok(outcome) => ExitCode::from(outcome.code()),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(ProcessExit::Failure.code())
        }
    }
}

async fn run(cli: Cli) -> Result<ProcessExit> {
    let loaded_config = app_config::load_default_file_config()?;
    let settings = config_runtime::apply_config_defaults(&cli, loaded_config.config.as_ref())?;

    let no_color =
        terminal::should_disable_color(terminal::no_color_env_requested(), terminal::is_dumb_terminal());
    terminal::init_tracing(
        config_runtime::resolve_default_log_level(&settings),
        config_runtime::should_force_cli_log_level(&cli),
        no_color,
    );

    debug!(?cli, ?settings, "CLI arguments parsed");

    command_dispatcher::dispatch(&cli.command, &settings, &loaded_config).await
}
