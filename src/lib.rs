//! Auto-fiddler core library
//!
//! Collects ABC-notation tunes from the web: scrape source pages for links to
//! tune files, fetch them with bounded concurrency, drop duplicate content,
//! and sort what remains into single tunes, collections and everything else.
//!
//! # Architecture
//!
//! - [`scrape`] - link extraction from HTML pages
//! - [`download`] - HTTP client and the bounded concurrent fetch engine
//! - [`notation`] - ABC document interpretation and metadata extraction
//! - [`organize`] - filesystem passes (dedup, classification, splitting)
//! - [`sites`] - YAML site list loading
//! - [`pipeline`] - the end-to-end scrape, fetch, dedup, classify run

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod notation;
pub mod organize;
pub mod pipeline;
pub mod scrape;
pub mod sites;
mod user_agent;

// Re-export commonly used types
pub use download::{
    DEFAULT_CONCURRENCY, DownloadError, EngineError, FetchEngine, FetchOutcome, FetchReport,
    FetchStatus, FileFetcher, HttpClient,
};
pub use notation::{AbcInterpreter, Interpretation, Interpreter, MetadataRecord, extract_metadata};
pub use organize::{
    Bucket, Classifier, ClassifySummary, OrganizeError, extract_tunes_from_collection,
    remove_duplicates,
};
pub use pipeline::{Pipeline, PipelineError, PipelineReport};
pub use scrape::LinkScraper;
pub use sites::{SiteList, SiteListError, load_site_list};
