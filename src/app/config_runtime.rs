//! Merging CLI flags, the config file and built-in defaults into the
//! effective run settings.
//!
//! Precedence: explicit CLI flag > config file > built-in default.

use std::path::PathBuf;

use anyhow::{Result, bail};
use auto_fiddler::download::{CONNECT_TIMEOUT_SECS, DEFAULT_CONCURRENCY, REQUEST_TIMEOUT_SECS};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Cli;

pub(crate) const DEFAULT_OUTPUT_DIR: &str = "./downloads";
pub(crate) const DEFAULT_EXTENSION: &str = ".abc";

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) output_dir: PathBuf,
    pub(crate) extension: String,
    pub(crate) concurrency: u8,
    pub(crate) connect_timeout_secs: u64,
    pub(crate) request_timeout_secs: u64,
    pub(crate) verbose: u8,
    pub(crate) quiet: bool,
}

impl Default for Settings {
    #[allow(clippy::cast_possible_truncation)]
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            concurrency: DEFAULT_CONCURRENCY as u8,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            verbose: 0,
            quiet: false,
        }
    }
}

pub(crate) fn apply_config_defaults(cli: &Cli, file_config: Option<&FileConfig>) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(file_config) = file_config {
        if let Some(output_dir) = &file_config.output_dir {
            settings.output_dir = output_dir.clone();
        }
        if let Some(extension) = &file_config.extension {
            settings.extension = extension.clone();
        }
        if let Some(concurrency) = file_config.concurrency {
            settings.concurrency = concurrency;
        }
        if let Some(secs) = file_config.connect_timeout_secs {
            settings.connect_timeout_secs = secs;
        }
        if let Some(secs) = file_config.request_timeout_secs {
            settings.request_timeout_secs = secs;
        }
        if let Some(verbosity) = file_config.verbosity {
            apply_config_verbosity(&mut settings, verbosity);
        }
    }

    if let Some(output_dir) = &cli.output_dir {
        settings.output_dir = output_dir.clone();
    }
    if let Some(extension) = &cli.extension {
        settings.extension = extension.clone();
    }
    if let Some(concurrency) = cli.concurrency {
        settings.concurrency = concurrency;
    }
    if should_force_cli_log_level(cli) {
        settings.verbose = cli.verbose;
        settings.quiet = cli.quiet;
    }

    if !(1..=100).contains(&settings.concurrency) {
        bail!(
            "Invalid effective concurrency value: {}. Expected range: 1..=100",
            settings.concurrency
        );
    }
    if settings.extension.is_empty() {
        bail!("Invalid effective extension: must not be empty");
    }

    Ok(settings)
}

fn apply_config_verbosity(settings: &mut Settings, verbosity: VerbositySetting) {
    let (verbose, quiet) = match verbosity {
        VerbositySetting::Default => (0, false),
        VerbositySetting::Verbose => (1, false),
        VerbositySetting::Quiet => (0, true),
        VerbositySetting::Debug => (2, false),
    };
    settings.verbose = verbose;
    settings.quiet = quiet;
}

pub(crate) fn resolve_default_log_level(settings: &Settings) -> &'static str {
    if settings.quiet {
        "error"
    } else {
        match settings.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

pub(crate) fn should_force_cli_log_level(cli: &Cli) -> bool {
    cli.verbose > 0 || cli.quiet
}

pub(crate) fn verbosity_label(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        VerbositySetting::Quiet.as_str()
    } else if verbose == 0 {
        VerbositySetting::Default.as_str()
    } else if verbose == 1 {
        VerbositySetting::Verbose.as_str()
    } else {
        VerbositySetting::Debug.as_str()
    }
}
