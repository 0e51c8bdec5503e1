//! Bounded concurrent fetcher.
//!
//! `FetchEngine` downloads a batch of URLs into one directory, never running
//! more than `concurrency` transfers at once. Failures are logged and recorded
//! per URL; none of them aborts the batch.
//!
//! # Concurrency Model
//!
//! - A semaphore permit is acquired *before* each task is spawned
//! - Each download runs in its own Tokio task holding an owned permit
//! - Permits are released automatically when a task ends (RAII)
//! - `fetch_all` joins every task before returning
//!
//! Two URLs with the same final path segment write the same destination file.
//! Which body ends up on disk is unspecified; callers must supply URLs with
//! distinct final segments if that matters.
//!
//! # Example
//!
//! ```no_run
//! use auto_fiddler::download::{FetchEngine, HttpClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = FetchEngine::new(4)?;
//! let client = HttpClient::new();
//! let urls = vec!["https://example.com/tunes/reel.abc".to_string()];
//! let report = engine.fetch_all(&client, &urls, Path::new("./downloads")).await?;
//! println!("Completed: {}, Failed: {}", report.completed(), report.failed());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::DownloadError;
use super::constants::{MAX_CONCURRENCY, MIN_CONCURRENCY};

/// Capability to fetch one URL into a directory.
///
/// `HttpClient` is the production implementation; the seam exists so the
/// engine's admission control can be exercised without a network.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Fetches `url` and writes it under `dest_dir`, returning the written path.
    async fn fetch_to_dir(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, DownloadError>;
}

/// Error type for fetch engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The destination directory could not be created.
    #[error("cannot prepare destination directory {path}: {source}")]
    Io {
        /// Destination directory.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Outcome of one URL in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Body written to this path.
    Saved(PathBuf),
    /// Fetch failed; the reason is the rendered error.
    Failed(String),
}

/// Per-URL result of a batch fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// The requested URL.
    pub url: String,
    /// What happened to it.
    pub status: FetchStatus,
}

impl FetchOutcome {
    /// Returns true when the body was written to disk.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self.status, FetchStatus::Saved(_))
    }
}

/// Results of a `fetch_all` call, one outcome per input URL in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    outcomes: Vec<FetchOutcome>,
}

impl FetchReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All outcomes, in the order the URLs were supplied.
    #[must_use]
    pub fn outcomes(&self) -> &[FetchOutcome] {
        &self.outcomes
    }

    /// Number of URLs whose body was written.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    /// Number of URLs that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.completed()
    }

    /// Total number of URLs processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// URLs that failed, in input order.
    pub fn failed_urls(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_saved())
            .map(|o| o.url.as_str())
    }

    /// Paths written, in input order.
    pub fn saved_paths(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            FetchStatus::Saved(path) => Some(path.as_path()),
            FetchStatus::Failed(_) => None,
        })
    }

    fn push(&mut self, outcome: FetchOutcome) {
        self.outcomes.push(outcome);
    }
}

/// Fetch engine with a fixed number of transfer slots.
#[derive(Debug)]
pub struct FetchEngine {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    concurrency: usize,
}

impl FetchEngine {
    /// Creates a new engine allowing `concurrency` simultaneous transfers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    ///
    /// # Example
    ///
    /// ```
    /// use auto_fiddler::download::FetchEngine;
    ///
    /// let engine = FetchEngine::new(4).unwrap();
    /// assert_eq!(engine.concurrency(), 4);
    /// ```
    #[instrument(level = "debug")]
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, "creating fetch engine");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetches every URL into `dest_dir` and waits for all of them to finish.
    ///
    /// The destination directory is created if missing. Individual fetch
    /// failures do NOT cause this method to error; they are logged and
    /// recorded in the returned report.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if `dest_dir` cannot be created.
    /// Returns [`EngineError::SemaphoreClosed`] if the semaphore is closed.
    #[instrument(skip(self, fetcher, urls), fields(dest_dir = %dest_dir.display(), urls = urls.len()))]
    pub async fn fetch_all<F>(
        &self,
        fetcher: &F,
        urls: &[String],
        dest_dir: &Path,
    ) -> Result<FetchReport, EngineError>
    where
        F: FileFetcher + Clone + 'static,
    {
        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|source| EngineError::Io {
                path: dest_dir.to_path_buf(),
                source,
            })?;

        info!("starting batch fetch");
        let mut handles = Vec::with_capacity(urls.len());

        for url in urls {
            // Blocks while `concurrency` transfers are in flight.
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| EngineError::SemaphoreClosed)?;

            let fetcher = fetcher.clone();
            let task_url = url.clone();
            let dest_dir = dest_dir.to_path_buf();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                fetch_one(&fetcher, task_url, &dest_dir).await
            });
            handles.push((url.clone(), handle));
        }

        debug!(task_count = handles.len(), "waiting for fetches to complete");

        let mut report = FetchReport::new();
        for (url, handle) in handles {
            match handle.await {
                Ok(outcome) => report.push(outcome),
                Err(e) => {
                    warn!(url = %url, error = %e, "fetch task panicked");
                    report.push(FetchOutcome {
                        url,
                        status: FetchStatus::Failed(format!("task panicked: {e}")),
                    });
                }
            }
        }

        info!(
            completed = report.completed(),
            failed = report.failed(),
            total = report.total(),
            "batch fetch complete"
        );
        Ok(report)
    }
}

async fn fetch_one<F: FileFetcher>(fetcher: &F, url: String, dest_dir: &Path) -> FetchOutcome {
    match fetcher.fetch_to_dir(&url, dest_dir).await {
        Ok(path) => {
            info!(url = %url, path = %path.display(), "downloaded");
            FetchOutcome {
                url,
                status: FetchStatus::Saved(path),
            }
        }
        Err(e) => {
            warn!(url = %url, error = %e, "download failed");
            FetchOutcome {
                url,
                status: FetchStatus::Failed(e.to_string()),
            }
        }
    }
}
