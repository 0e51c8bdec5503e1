//! Sorting downloaded files into bucket subdirectories by document shape.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use super::OrganizeError;
use crate::notation::{AbcInterpreter, Interpretation, Interpreter};

/// Classification outcome, one subdirectory of the target folder each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Single tunes.
    Tunes,
    /// Multi-tune documents.
    Collections,
    /// Readable but neither shape.
    Others,
    /// Could not be parsed.
    Unknown,
}

impl Bucket {
    /// Every bucket.
    pub const ALL: [Self; 4] = [Self::Tunes, Self::Collections, Self::Others, Self::Unknown];

    /// Subdirectory name under the target folder.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Tunes => "tunes",
            Self::Collections => "collections",
            Self::Others => "others",
            Self::Unknown => "unknown",
        }
    }

    /// Maps an interpretation to its bucket.
    #[must_use]
    pub fn for_interpretation(interpretation: &Interpretation) -> Self {
        match interpretation {
            Interpretation::Tune => Self::Tunes,
            Interpretation::Collection { .. } => Self::Collections,
            Interpretation::Unrecognized => Self::Others,
            Interpretation::ParseFailed { .. } => Self::Unknown,
        }
    }

    fn is_bucket_dir_name(name: &OsStr) -> bool {
        Self::ALL.iter().any(|b| OsStr::new(b.dir_name()) == name)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Where a classified file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// Chosen bucket.
    pub bucket: Bucket,
    /// Final location of the file.
    pub destination: PathBuf,
    /// False when the file already sat at its destination.
    pub moved: bool,
}

/// Per-bucket counts from a `classify_all` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifySummary {
    pub tunes: usize,
    pub collections: usize,
    pub others: usize,
    pub unknown: usize,
}

impl ClassifySummary {
    /// Files counted for `bucket`.
    #[must_use]
    pub fn count(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Tunes => self.tunes,
            Bucket::Collections => self.collections,
            Bucket::Others => self.others,
            Bucket::Unknown => self.unknown,
        }
    }

    /// Files classified in total.
    #[must_use]
    pub fn total(&self) -> usize {
        self.tunes + self.collections + self.others + self.unknown
    }

    fn record(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Tunes => self.tunes += 1,
            Bucket::Collections => self.collections += 1,
            Bucket::Others => self.others += 1,
            Bucket::Unknown => self.unknown += 1,
        }
    }
}

/// Moves files into `target_folder/<bucket>/` according to an [`Interpreter`].
#[derive(Debug, Clone)]
pub struct Classifier<I = AbcInterpreter> {
    target_folder: PathBuf,
    interpreter: I,
}

impl Classifier<AbcInterpreter> {
    /// Classifier for ABC notation rooted at `target_folder`.
    #[must_use]
    pub fn abc(target_folder: impl Into<PathBuf>) -> Self {
        Self::new(target_folder, AbcInterpreter)
    }
}

impl<I: Interpreter> Classifier<I> {
    /// Creates a classifier rooted at `target_folder`.
    #[must_use]
    pub fn new(target_folder: impl Into<PathBuf>, interpreter: I) -> Self {
        Self {
            target_folder: target_folder.into(),
            interpreter,
        }
    }

    /// Directory for `bucket`.
    #[must_use]
    pub fn bucket_dir(&self, bucket: Bucket) -> PathBuf {
        self.target_folder.join(bucket.dir_name())
    }

    /// Interprets `path` and moves it to `target_folder/<bucket>/<file name>`.
    ///
    /// The bucket directory is created on demand. A file with the same name
    /// already in the bucket is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::Io`] if the file cannot be read, the bucket
    /// directory cannot be created, or the move fails.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn classify(&self, path: &Path) -> Result<Classified, OrganizeError> {
        let content = std::fs::read(path).map_err(|e| OrganizeError::io(path, e))?;
        let interpretation = self.interpreter.interpret(&content);
        if let Interpretation::ParseFailed { reason } = &interpretation {
            warn!(path = %path.display(), %reason, "could not parse; routing to unknown");
        }
        let bucket = Bucket::for_interpretation(&interpretation);

        let file_name = path.file_name().ok_or_else(|| {
            OrganizeError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;
        let bucket_dir = self.bucket_dir(bucket);
        let destination = bucket_dir.join(file_name);

        if destination == path {
            debug!(%bucket, "already in place");
            return Ok(Classified {
                bucket,
                destination,
                moved: false,
            });
        }

        std::fs::create_dir_all(&bucket_dir).map_err(|e| OrganizeError::io(&bucket_dir, e))?;
        std::fs::rename(path, &destination).map_err(|e| OrganizeError::io(path, e))?;
        info!(from = %path.display(), to = %destination.display(), %bucket, "moved");

        Ok(Classified {
            bucket,
            destination,
            moved: true,
        })
    }

    /// Classifies every file under the target folder whose name ends with
    /// `extension`, recursing into subdirectories.
    ///
    /// The bucket directories themselves are not revisited, so a second pass
    /// over an organized tree moves nothing.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError`] on the first traversal or move failure.
    #[instrument(skip(self), fields(target_folder = %self.target_folder.display()))]
    pub fn classify_all(&self, extension: &str) -> Result<ClassifySummary, OrganizeError> {
        let candidates = self.candidate_files(extension)?;
        debug!(candidates = candidates.len(), "files to classify");

        let mut summary = ClassifySummary::default();
        for path in candidates {
            let classified = self.classify(&path)?;
            summary.record(classified.bucket);
        }

        info!(
            tunes = summary.tunes,
            collections = summary.collections,
            others = summary.others,
            unknown = summary.unknown,
            "classification complete"
        );
        Ok(summary)
    }

    fn candidate_files(&self, extension: &str) -> Result<Vec<PathBuf>, OrganizeError> {
        let walker = WalkDir::new(&self.target_folder)
            .into_iter()
            .filter_entry(|entry| {
                !(entry.depth() == 1
                    && entry.file_type().is_dir()
                    && Bucket::is_bucket_dir_name(entry.file_name()))
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| OrganizeError::walk(&self.target_folder, e))?;
            if entry.file_type().is_file()
                && entry.file_name().to_string_lossy().ends_with(extension)
            {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}
