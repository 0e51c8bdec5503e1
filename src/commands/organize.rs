//! `dedupe`, `classify` and `split` command handlers.

use anyhow::{Context, Result};
use auto_fiddler::{Classifier, extract_tunes_from_collection, remove_duplicates};

use crate::app::config_runtime::Settings;
use crate::cli::SplitArgs;

pub(crate) fn run_dedupe_command(settings: &Settings) -> Result<()> {
    let removed = remove_duplicates(&settings.output_dir).with_context(|| {
        format!(
            "Failed to remove duplicates under '{}'",
            settings.output_dir.display()
        )
    })?;
    println!("duplicates removed: {removed}");
    Ok(())
}

pub(crate) fn run_classify_command(settings: &Settings) -> Result<()> {
    let summary = Classifier::abc(settings.output_dir.clone())
        .classify_all(&settings.extension)
        .with_context(|| format!("Failed to classify '{}'", settings.output_dir.display()))?;
    super::print_classify_summary(&summary);
    Ok(())
}

pub(crate) fn run_split_command(args: &SplitArgs) -> Result<()> {
    let dest = match &args.dest {
        Some(dest) => dest.clone(),
        None => args
            .file
            .parent()
            .map(std::path::Path::to_path_buf)
            .unwrap_or_default(),
    };
    let written = extract_tunes_from_collection(&args.file, &dest, !args.remove_original)
        .with_context(|| format!("Failed to split '{}'", args.file.display()))?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
