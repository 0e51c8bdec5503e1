//! Subcommand handlers.

mod collect;
mod config;
mod metadata;
mod organize;

pub(crate) use collect::{run_fetch_command, run_pipeline_command};
pub(crate) use config::run_config_show_command;
pub(crate) use metadata::run_metadata_command;
pub(crate) use organize::{run_classify_command, run_dedupe_command, run_split_command};

use auto_fiddler::{Bucket, ClassifySummary};

fn print_classify_summary(summary: &ClassifySummary) {
    for bucket in Bucket::ALL {
        println!("{bucket}: {}", summary.count(bucket));
    }
}
