//! HTTP fetching: page bodies for the scraper and bounded batch downloads.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Destination filename taken from the URL's last path segment
//! - Bounded timeouts (10s connect, 10s total by default)
//! - Semaphore-gated batch fetching with a per-URL outcome report
//!
//! # Example
//!
//! ```no_run
//! use auto_fiddler::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let file_path = client
//!     .download_to_dir("https://example.com/tunes/jig.abc", Path::new("./downloads"))
//!     .await?;
//! println!("Downloaded: {}", file_path.display());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
mod filename;

pub use client::HttpClient;
pub use constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_CONCURRENCY, MAX_CONCURRENCY, MIN_CONCURRENCY,
    REQUEST_TIMEOUT_SECS,
};
pub use engine::{EngineError, FetchEngine, FetchOutcome, FetchReport, FetchStatus, FileFetcher};
pub use error::DownloadError;
pub use filename::{destination_path, filename_from_url};
