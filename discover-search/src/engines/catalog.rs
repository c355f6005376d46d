//! Catalog searcher: matches candidates against a local list of entries.
//!
//! The catalog is a JSON array of entries (`{"title": ..., "url": ...}`
//! plus any extra fields). Every entry the comparator accepts becomes a
//! result whose `search_sort` is the similarity ratio.

use std::path::Path;

use serde_json::Value;

use crate::comparator::Comparator;
use crate::engine::Searcher;
use crate::error::SearchError;
use crate::types::{Candidate, SearchResult};

/// In-memory catalog searcher.
///
/// Accepts an optional config block `{ "category": "<name>" }` which
/// restricts matching to entries whose `category` field equals the value.
#[derive(Debug, Clone, Default)]
pub struct CatalogSearcher {
    entries: Vec<Candidate>,
}

impl CatalogSearcher {
    /// Create a searcher over `entries`.
    pub fn new(entries: Vec<Candidate>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the file cannot be read or is not
    /// a JSON array of entries.
    pub fn from_file(path: &Path) -> Result<Self, SearchError> {
        let bytes = std::fs::read(path).map_err(|e| {
            SearchError::Config(format!("cannot read catalog {}: {e}", path.display()))
        })?;
        let entries: Vec<Candidate> = serde_json::from_slice(&bytes).map_err(|e| {
            SearchError::Config(format!("cannot parse catalog {}: {e}", path.display()))
        })?;
        Ok(Self::new(entries))
    }

    /// Number of entries in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn category_filter(config: Option<&Value>) -> Result<Option<&str>, SearchError> {
    let Some(category) = config.and_then(|c| c.get("category")) else {
        return Ok(None);
    };
    category
        .as_str()
        .map(Some)
        .ok_or_else(|| SearchError::Config("catalog `category` must be a string".into()))
}

impl Searcher for CatalogSearcher {
    fn search(
        &self,
        candidate: &Candidate,
        comparator: &Comparator,
        config: Option<&Value>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let category = category_filter(config)?;

        let results: Vec<SearchResult> = self
            .entries
            .iter()
            .filter(|entry| match category {
                Some(wanted) => {
                    entry.fields.get("category").and_then(Value::as_str) == Some(wanted)
                }
                None => true,
            })
            .filter_map(|entry| {
                let judgment = comparator.judge(&candidate.title, &entry.title);
                judgment
                    .accepted
                    .then(|| SearchResult::from_entry(entry.clone(), judgment.ratio))
            })
            .collect();

        if results.is_empty() {
            return Err(SearchError::Warning(format!(
                "no catalog matches for `{}`",
                candidate.title
            )));
        }
        Ok(results)
    }

    fn validate_config(&self, config: Option<&Value>) -> Result<(), SearchError> {
        category_filter(config).map(|_| ())
    }
}
