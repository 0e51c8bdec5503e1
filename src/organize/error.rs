//! Error types for filesystem organization passes.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from dedup, classification and splitting.
///
/// These are fatal: a pass that cannot read, move or delete a file stops
/// rather than silently losing track of it.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// File system error on a specific path.
    #[error("IO error at {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("cannot walk {root}: {source}")]
    Walk {
        /// Root of the traversal.
        root: PathBuf,
        /// The underlying traversal error.
        #[source]
        source: walkdir::Error,
    },
}

impl OrganizeError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a traversal error.
    pub fn walk(root: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Walk {
            root: root.into(),
            source,
        }
    }
}
