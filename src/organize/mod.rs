//! Filesystem passes over a download tree: duplicate removal, classification
//! into bucket subdirectories, and splitting collections into single tunes.
//!
//! Every pass takes its root directory as a parameter and is synchronous;
//! async callers should run them on a blocking thread.

mod classify;
mod dedup;
mod error;
mod split;

pub use classify::{Bucket, Classified, Classifier, ClassifySummary};
pub use dedup::{ContentFingerprint, fingerprint_file, remove_duplicates};
pub use error::OrganizeError;
pub use split::extract_tunes_from_collection;
