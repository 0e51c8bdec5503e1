//! Writing the tunes of a collection out as individual files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use super::OrganizeError;
use crate::notation::split_collection;

/// Splits the collection at `source` into one file per tune under `target_dir`.
///
/// Each tune is written to `<source stem>_<reference>.<source extension>`,
/// where the reference is the tune's `X:` value reduced to filename-safe
/// characters (or its 1-based position when nothing is left). A label already
/// used by an earlier tune of the same collection gets a `-<n>` suffix, so
/// every tune lands in its own file. The source is deleted only after all
/// tunes are written, and only when `keep_original` is unset. A document without `X:`
/// lines produces no files and is never deleted.
///
/// # Errors
///
/// Returns [`OrganizeError::Io`] if the source cannot be read, a tune cannot
/// be written, or the source cannot be removed.
#[instrument(fields(source = %source.display(), target_dir = %target_dir.display()))]
pub fn extract_tunes_from_collection(
    source: &Path,
    target_dir: &Path,
    keep_original: bool,
) -> Result<Vec<PathBuf>, OrganizeError> {
    let bytes = std::fs::read(source).map_err(|e| OrganizeError::io(source, e))?;
    let text = String::from_utf8_lossy(&bytes);
    let sections = split_collection(&text);

    if sections.is_empty() {
        warn!(source = %source.display(), "no tunes found; nothing to split");
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(target_dir).map_err(|e| OrganizeError::io(target_dir, e))?;

    let stem = source
        .file_stem()
        .map_or_else(|| "tune".to_string(), |s| s.to_string_lossy().into_owned());
    let extension = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut written = Vec::with_capacity(sections.len());
    let mut used = HashSet::with_capacity(sections.len());
    for (index, section) in sections.iter().enumerate() {
        let label = unique_label(reference_label(&section.reference, index), index, &mut used);
        let path = target_dir.join(format!("{stem}_{label}{extension}"));
        std::fs::write(&path, &section.text).map_err(|e| OrganizeError::io(&path, e))?;
        written.push(path);
    }

    if !keep_original {
        std::fs::remove_file(source).map_err(|e| OrganizeError::io(source, e))?;
    }

    info!(tunes = written.len(), keep_original, "collection split");
    Ok(written)
}

fn reference_label(reference: &str, index: usize) -> String {
    let cleaned: String = reference
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    if cleaned.is_empty() {
        (index + 1).to_string()
    } else {
        cleaned
    }
}

fn unique_label(label: String, index: usize, used: &mut HashSet<String>) -> String {
    if used.insert(label.clone()) {
        return label;
    }
    let mut n = index + 1;
    loop {
        let candidate = format!("{label}-{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
