//! Link discovery on a single web page.
//!
//! The scraper fetches one page, enumerates its `<a href>` anchors and returns
//! the absolute URLs of those whose target ends with a requested extension.
//! It does not follow links.
//!
//! # Example
//!
//! ```
//! use auto_fiddler::scrape::extract_links;
//!
//! let html = r#"<a href="a.abc">A</a> <a href="b.txt">B</a>"#;
//! let links = extract_links(html, "http://x.test/dir/page.html", ".abc");
//! assert_eq!(links, vec!["http://x.test/dir/a.abc".to_string()]);
//! ```

use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::download::HttpClient;

/// Fetches pages and extracts file links from them.
#[derive(Debug, Clone)]
pub struct LinkScraper {
    client: HttpClient,
}

impl LinkScraper {
    /// Creates a scraper that fetches pages through `client`.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Fetches `page_url` and returns the absolute URLs of anchors whose
    /// `href` ends with `extension`, in document order.
    ///
    /// A page that cannot be fetched (network error, timeout, non-2xx) is
    /// logged and yields an empty list; the error is not propagated.
    #[instrument(skip(self), fields(page_url = %page_url, extension = %extension))]
    pub async fn scrape(&self, page_url: &str, extension: &str) -> Vec<String> {
        let body = match self.client.fetch_text(page_url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(page_url = %page_url, error = %e, "error fetching links");
                return Vec::new();
            }
        };

        let links = extract_links(&body, page_url, extension);
        info!(page_url = %page_url, found = links.len(), "links extracted");
        links
    }
}

/// Extracts anchor targets ending with `extension` from `html`, resolved
/// against `base_url`.
///
/// The suffix match is applied to the raw `href` string: no normalization of
/// case, query strings or fragments. Duplicates are kept. Targets that cannot
/// be resolved to an absolute URL are skipped.
#[must_use]
pub fn extract_links(html: &str, base_url: &str, extension: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        warn!(base_url = %base_url, "base URL is not absolute; no links resolved");
        return Vec::new();
    };
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.ends_with(extension))
        .filter_map(|href| match base.join(href) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(e) => {
                debug!(href = %href, error = %e, "skipping unresolvable link");
                None
            }
        })
        .collect()
}
