//! `metadata` command handler.

use std::path::Path;

use anyhow::{Context, Result};
use auto_fiddler::extract_metadata;

pub(crate) fn run_metadata_command(file: &Path) -> Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read '{}'", file.display()))?;
    let record = extract_metadata(&String::from_utf8_lossy(&bytes));
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
