//! Constants for the download module (timeouts, concurrency bounds).

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default total request timeout (10 seconds), applied to page and file fetches alike.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Minimum allowed concurrency value.
pub const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub const MAX_CONCURRENCY: usize = 100;

/// Default concurrency: strictly sequential fetches.
pub const DEFAULT_CONCURRENCY: usize = 1;
