//! Core types for seed candidates and the search results found for them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A seed item emitted by an input producer.
///
/// `title` is the identity used for deduplication and interval gating.
/// Any fields besides `title`, `url` and `urls` are kept in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Title of the item, e.g. `"Show S01E01"`.
    pub title: String,
    /// Primary location of the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Additional locations, in producer order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    /// Producer-specific extra fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Candidate {
    /// Create a candidate with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
            urls: Vec::new(),
            fields: Map::new(),
        }
    }

    /// Set the primary url.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Append a secondary url.
    #[must_use]
    pub fn with_extra_url(mut self, url: impl Into<String>) -> Self {
        self.urls.push(url.into());
        self
    }

    /// Attach an extra field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// All locations of this candidate: the primary url (when non-empty)
    /// followed by every secondary url.
    pub fn all_urls(&self) -> Vec<&str> {
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .into_iter()
            .chain(self.urls.iter().map(String::as_str))
            .collect()
    }
}

/// A match returned by a searcher for one [`Candidate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the matched item as reported by the source.
    pub title: String,
    /// Primary location of the match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Additional locations of the match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    /// Ranking key. Higher sorts first.
    pub search_sort: f64,
    /// Source-specific extra fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SearchResult {
    /// Build a result from a matched entry and its ranking key.
    pub fn from_entry(entry: Candidate, search_sort: f64) -> Self {
        Self {
            title: entry.title,
            url: entry.url,
            urls: entry.urls,
            search_sort,
            fields: entry.fields,
        }
    }
}
