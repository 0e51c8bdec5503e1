//! Destination filename derivation for downloads.
//!
//! A download lands at `dest_dir/<last path segment of its URL>`. Two URLs that
//! share a final segment map to the same path; the later write wins.
//!
//! A URL whose path has no final segment (`https://host/dir/`) is saved as
//! `download_<unix seconds>.bin`. Such URLs fetched within the same second
//! share that name and collide the same way.

use std::path::{Component, Path, PathBuf};

use tracing::debug;
use url::Url;

/// Returns the destination path for `url` inside `dest_dir`.
#[must_use]
pub fn destination_path(dest_dir: &Path, url: &Url) -> PathBuf {
    dest_dir.join(filename_from_url(url))
}

/// Filename derived from the URL's last path segment, percent-decoded and
/// sanitized, or `download_<timestamp>.bin` when the path has no final segment.
#[must_use]
pub fn filename_from_url(url: &Url) -> String {
    if let Some(mut segments) = url.path_segments()
        && let Some(last) = segments.next_back()
        && !last.is_empty()
    {
        let decoded = urlencoding::decode(last).unwrap_or_else(|e| {
            debug!(segment = %last, error = %e, "URL decoding failed, using raw segment");
            std::borrow::Cow::Borrowed(last)
        });
        return sanitize_filename(&decoded);
    }

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("download_{timestamp}.bin")
}

/// Sanitizes filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
