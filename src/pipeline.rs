//! End-to-end collection run: scrape, fetch, dedup, classify.
//!
//! Source pages are processed one after another; within a page the file
//! fetches run on the engine's bounded slots. The two filesystem passes run
//! on a blocking thread once every fetch has finished. Duplicates are removed
//! before classification so a copy never reaches a bucket.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::download::{EngineError, FetchEngine, FetchReport, HttpClient};
use crate::notation::{AbcInterpreter, Interpreter};
use crate::organize::{Classifier, ClassifySummary, OrganizeError, remove_duplicates};
use crate::scrape::LinkScraper;

/// Errors that stop a pipeline run.
///
/// Per-URL fetch failures are not errors; they are recorded in the
/// [`FetchReport`]s.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The fetch engine could not run a batch.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A filesystem pass failed.
    #[error(transparent)]
    Organize(#[from] OrganizeError),

    /// A blocking filesystem task panicked or was cancelled.
    #[error("filesystem task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Summary of a full run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// One fetch report per source page, in source order.
    pub fetch: Vec<FetchReport>,
    /// Files deleted by the duplicate pass.
    pub duplicates_removed: usize,
    /// Bucket counts from the classification pass.
    pub classified: ClassifySummary,
}

impl PipelineReport {
    /// Files written across all sources.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.fetch.iter().map(FetchReport::completed).sum()
    }

    /// Failed fetches across all sources.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.fetch.iter().map(FetchReport::failed).sum()
    }
}

/// Orchestrates the collection stages over one target directory.
#[derive(Debug)]
pub struct Pipeline<I = AbcInterpreter> {
    scraper: LinkScraper,
    client: HttpClient,
    engine: FetchEngine,
    target_dir: PathBuf,
    interpreter: I,
}

impl Pipeline<AbcInterpreter> {
    /// Creates a pipeline that classifies with the ABC interpreter.
    #[must_use]
    pub fn new(client: HttpClient, engine: FetchEngine, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            scraper: LinkScraper::new(client.clone()),
            client,
            engine,
            target_dir: target_dir.into(),
            interpreter: AbcInterpreter,
        }
    }
}

impl<I> Pipeline<I>
where
    I: Interpreter + Clone + 'static,
{
    /// Replaces the interpreter used by the classification pass.
    #[must_use]
    pub fn with_interpreter<J: Interpreter + Clone + 'static>(self, interpreter: J) -> Pipeline<J> {
        Pipeline {
            scraper: self.scraper,
            client: self.client,
            engine: self.engine,
            target_dir: self.target_dir,
            interpreter,
        }
    }

    /// Scrapes each source page and fetches the links it yields.
    ///
    /// A page with no matching links is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Engine`] if the target directory cannot be
    /// created.
    #[instrument(skip(self, sources), fields(sources = sources.len(), target_dir = %self.target_dir.display()))]
    pub async fn fetch(
        &self,
        sources: &[String],
        extension: &str,
    ) -> Result<Vec<FetchReport>, PipelineError> {
        let mut reports = Vec::with_capacity(sources.len());
        for source in sources {
            let links = self.scraper.scrape(source, extension).await;
            if links.is_empty() {
                warn!(source = %source, "no files found");
                reports.push(FetchReport::new());
                continue;
            }
            let report = self
                .engine
                .fetch_all(&self.client, &links, &self.target_dir)
                .await?;
            reports.push(report);
        }
        Ok(reports)
    }

    /// Runs the duplicate pass over the target directory.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Organize`] if the pass fails, or
    /// [`PipelineError::Join`] if its thread dies.
    pub async fn remove_duplicates(&self) -> Result<usize, PipelineError> {
        let root = self.target_dir.clone();
        let removed = tokio::task::spawn_blocking(move || remove_duplicates(&root)).await??;
        Ok(removed)
    }

    /// Runs the classification pass over the target directory.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Organize`] if the pass fails, or
    /// [`PipelineError::Join`] if its thread dies.
    pub async fn classify(&self, extension: &str) -> Result<ClassifySummary, PipelineError> {
        let classifier = Classifier::new(self.target_dir.clone(), self.interpreter.clone());
        let extension = extension.to_string();
        let summary =
            tokio::task::spawn_blocking(move || classifier.classify_all(&extension)).await??;
        Ok(summary)
    }

    /// Scrape and fetch every source, then dedup and classify the target
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if any stage fails as a whole. Individual
    /// URL failures only show up in the report.
    #[instrument(skip(self, sources), fields(sources = sources.len(), extension = %extension))]
    pub async fn run(
        &self,
        sources: &[String],
        extension: &str,
    ) -> Result<PipelineReport, PipelineError> {
        let fetch = self.fetch(sources, extension).await?;
        // The target directory may not exist when every scrape came back empty.
        let (duplicates_removed, classified) = if self.target_dir.is_dir() {
            (
                self.remove_duplicates().await?,
                self.classify(extension).await?,
            )
        } else {
            (0, ClassifySummary::default())
        };

        let report = PipelineReport {
            fetch,
            duplicates_removed,
            classified,
        };
        info!(
            completed = report.completed(),
            failed = report.failed(),
            duplicates_removed,
            classified = classified.total(),
            "pipeline complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::notation::Interpretation;

    #[derive(Clone)]
    struct EverythingIsATune;

    impl Interpreter for EverythingIsATune {
        fn interpret(&self, _content: &[u8]) -> Interpretation {
            Interpretation::Tune
        }
    }

    fn pipeline(root: &Path) -> Pipeline {
        Pipeline::new(HttpClient::new(), FetchEngine::new(2).unwrap(), root)
    }

    #[test]
    fn test_report_totals_sum_sources() {
        let report = PipelineReport {
            fetch: vec![FetchReport::new(), FetchReport::new()],
            ..PipelineReport::default()
        };
        assert_eq!(report.completed(), 0);
        assert_eq!(report.failed(), 0);
    }

    #[tokio::test]
    async fn test_dedup_then_classify_leaves_one_copy_in_a_bucket() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("a.abc"), "X:1\nT:Jig\nK:G\nG|\n").unwrap();
        fs::write(root.join("b.abc"), "X:1\nT:Jig\nK:G\nG|\n").unwrap();
        let pipeline = pipeline(root);

        assert_eq!(pipeline.remove_duplicates().await.unwrap(), 1);
        let summary = pipeline.classify(".abc").await.unwrap();

        assert_eq!(summary.tunes, 1);
        assert_eq!(summary.total(), 1);
    }

    #[tokio::test]
    async fn test_custom_interpreter_drives_classification() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("noise.abc"), "no notation here").unwrap();
        let pipeline = pipeline(temp.path()).with_interpreter(EverythingIsATune);

        let summary = pipeline.classify(".abc").await.unwrap();

        assert_eq!(summary.tunes, 1);
        assert!(temp.path().join("tunes/noise.abc").is_file());
    }

    #[tokio::test]
    async fn test_run_without_sources_on_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let pipeline = pipeline(&temp.path().join("not-yet"));

        let report = pipeline.run(&[], ".abc").await.unwrap();

        assert_eq!(report, PipelineReport::default());
    }

    #[tokio::test]
    async fn test_remove_duplicates_on_missing_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let pipeline = pipeline(&temp.path().join("absent"));

        let result = pipeline.remove_duplicates().await;

        assert!(matches!(result, Err(PipelineError::Organize(_))));
    }
}
