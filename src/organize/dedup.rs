//! Content-hash duplicate elimination.
//!
//! Every file under a tree is hashed with SHA-256; the first path seen for a
//! digest is kept and every later one is deleted on the spot. "First" means
//! first in `walkdir` traversal order, which follows the filesystem and is not
//! stable across platforms.
//!
//! All digests stay in memory for the whole scan (O(distinct files)). Fine for
//! thousands of files; a much larger corpus would need an on-disk index.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use super::OrganizeError;

const HASH_CHUNK_SIZE: usize = 8192;

/// SHA-256 digest of a file's full content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentFingerprint([u8; 32]);

impl ContentFingerprint {
    /// Fingerprint of an in-memory buffer.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentFingerprint({self})")
    }
}

/// Computes the fingerprint of a file by streaming it in 8 KiB chunks.
///
/// # Errors
///
/// Returns [`OrganizeError::Io`] if the file cannot be opened or read.
pub fn fingerprint_file(path: &Path) -> Result<ContentFingerprint, OrganizeError> {
    let mut file = File::open(path).map_err(|e| OrganizeError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; HASH_CHUNK_SIZE];

    loop {
        let read = file.read(&mut buffer).map_err(|e| OrganizeError::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(ContentFingerprint(hasher.finalize().into()))
}

/// Deletes every file under `target_dir` whose content duplicates a file seen
/// earlier in the traversal, returning how many were removed.
///
/// # Errors
///
/// Returns [`OrganizeError`] if the tree cannot be walked, a file cannot be
/// hashed, or a duplicate cannot be deleted. Files removed before the error
/// stay removed.
#[instrument(fields(target_dir = %target_dir.display()))]
pub fn remove_duplicates(target_dir: &Path) -> Result<usize, OrganizeError> {
    let mut seen: HashMap<ContentFingerprint, PathBuf> = HashMap::new();
    let mut removed = 0usize;

    for entry in WalkDir::new(target_dir) {
        let entry = entry.map_err(|e| OrganizeError::walk(target_dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let fingerprint = fingerprint_file(path)?;

        if let Some(original) = seen.get(&fingerprint) {
            info!(
                path = %path.display(),
                original = %original.display(),
                "removing duplicate file"
            );
            std::fs::remove_file(path).map_err(|e| OrganizeError::io(path, e))?;
            removed += 1;
        } else {
            debug!(path = %path.display(), %fingerprint, "first copy");
            seen.insert(fingerprint, path.to_path_buf());
        }
    }

    info!(removed, distinct = seen.len(), "duplicate removal complete");
    Ok(removed)
}
