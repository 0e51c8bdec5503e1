//! Site list files: YAML mappings of category name to page URLs.
//!
//! ```yaml
//! fiddle:
//!   - https://example.com/tunes/abc1.html
//!   - https://example.com/tunes/abc2.html
//! pipes:
//!   - https://example.org/pipes/
//! ```
//!
//! Category order in the file is preserved.

use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;
use thiserror::Error;
use tracing::debug;

/// Errors from loading a site list.
#[derive(Debug, Error)]
pub enum SiteListError {
    /// The file could not be read.
    #[error("cannot read site list {path}: {source}")]
    Io {
        /// Site list path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML.
    #[error("invalid YAML in site list: {source}")]
    Parse {
        /// The underlying YAML error.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The top level is not a mapping.
    #[error("site list must be a mapping of category name to a list of URLs")]
    NotAMapping,

    /// A category key or value has the wrong shape.
    #[error("site list category {category}: {reason}")]
    InvalidCategory {
        /// Category name as written.
        category: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Ordered categories of source page URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteList {
    categories: Vec<(String, Vec<String>)>,
}

impl SiteList {
    /// Parses a site list from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`SiteListError`] if the text is not YAML, the top level is not
    /// a mapping, or a category is not a list of strings.
    pub fn from_yaml_str(raw: &str) -> Result<Self, SiteListError> {
        let document: Value =
            serde_yaml_ng::from_str(raw).map_err(|source| SiteListError::Parse { source })?;
        let Value::Mapping(mapping) = document else {
            return Err(SiteListError::NotAMapping);
        };

        let mut categories = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let Value::String(name) = key else {
                return Err(SiteListError::InvalidCategory {
                    category: format!("{key:?}"),
                    reason: "name must be a string",
                });
            };
            let urls = match value {
                Value::Sequence(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(url) => Ok(url),
                        _ => Err(SiteListError::InvalidCategory {
                            category: name.clone(),
                            reason: "every entry must be a URL string",
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                Value::Null => Vec::new(),
                _ => {
                    return Err(SiteListError::InvalidCategory {
                        category: name,
                        reason: "value must be a list of URLs",
                    });
                }
            };
            categories.push((name, urls));
        }

        Ok(Self { categories })
    }

    /// The first category in file order.
    #[must_use]
    pub fn first(&self) -> Option<(&str, &[String])> {
        self.categories
            .first()
            .map(|(name, urls)| (name.as_str(), urls.as_slice()))
    }

    /// URLs of the named category.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(category, _)| category == name)
            .map(|(_, urls)| urls.as_slice())
    }

    /// Category names in file order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Returns true if the list has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Loads a site list from a YAML file.
///
/// # Errors
///
/// Returns [`SiteListError::Io`] if the file cannot be read, or any parse
/// error from [`SiteList::from_yaml_str`].
pub fn load_site_list(path: &Path) -> Result<SiteList, SiteListError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SiteListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let list = SiteList::from_yaml_str(&raw)?;
    debug!(path = %path.display(), categories = list.categories.len(), "site list loaded");
    Ok(list)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SITES: &str = "\
fiddle:
  - https://nigelgatherer.test/tunes/abc/abc1.html
  - https://nigelgatherer.test/tunes/abc/abc2.html
pipes:
  - https://pipes.test/
";

    #[test]
    fn test_site_list_preserves_category_order() {
        let list = SiteList::from_yaml_str(SITES).unwrap();
        assert_eq!(list.categories().collect::<Vec<_>>(), vec!["fiddle", "pipes"]);
        let (name, urls) = list.first().unwrap();
        assert_eq!(name, "fiddle");
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn test_site_list_named_category() {
        let list = SiteList::from_yaml_str(SITES).unwrap();
        assert_eq!(
            list.category("pipes").unwrap(),
            &["https://pipes.test/".to_string()]
        );
        assert!(list.category("banjo").is_none());
    }

    #[test]
    fn test_site_list_rejects_non_mapping() {
        let result = SiteList::from_yaml_str("- https://a.test/\n");
        assert!(matches!(result, Err(SiteListError::NotAMapping)));
    }

    #[test]
    fn test_site_list_rejects_scalar_category() {
        let result = SiteList::from_yaml_str("fiddle: https://a.test/\n");
        assert!(matches!(
            result,
            Err(SiteListError::InvalidCategory { category, .. }) if category == "fiddle"
        ));
    }

    #[test]
    fn test_site_list_rejects_non_string_entry() {
        let result = SiteList::from_yaml_str("fiddle:\n  - 42\n");
        assert!(matches!(result, Err(SiteListError::InvalidCategory { .. })));
    }

    #[test]
    fn test_site_list_empty_category_is_allowed() {
        let list = SiteList::from_yaml_str("fiddle:\n").unwrap();
        assert_eq!(list.category("fiddle").unwrap().len(), 0);
    }

    #[test]
    fn test_site_list_invalid_yaml() {
        let result = SiteList::from_yaml_str("fiddle: [unclosed\n");
        assert!(matches!(result, Err(SiteListError::Parse { .. })));
    }

    #[test]
    fn test_load_site_list_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sites.yaml");
        std::fs::write(&path, SITES).unwrap();

        let list = load_site_list(&path).unwrap();
        assert!(!list.is_empty());
    }

    #[test]
    fn test_load_site_list_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load_site_list(&temp.path().join("absent.yaml"));
        assert!(matches!(result, Err(SiteListError::Io { .. })));
    }
}
