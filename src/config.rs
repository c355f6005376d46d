//! Discovery configuration.
//!
//! ```toml
//! interval = "2 hours"
//! type = "exact"
//! limit = 5
//!
//! [[what]]
//! list = [{ title = "Show S01E01" }]
//!
//! [[from]]
//! catalog = { category = "tv" }
//! ```
//!
//! `from` entries may also be bare names: `from = ["catalog"]`.

use std::path::Path;

use discover_search::{ComparatorKind, SearchConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DiscoverError, Result};
use crate::interval::parse_interval;
use crate::registry::PluginRegistry;

/// Top-level configuration of one discovery task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverConfig {
    /// Input producers, each entry a single-key mapping of producer name
    /// to its config.
    pub what: Vec<Map<String, Value>>,
    /// Searchers, by bare name or name-to-config mapping.
    pub from: Vec<SearcherEntry>,
    /// Maximum results kept per (candidate, searcher) pair. `0` keeps none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Minimum time between two runs of the same title. Defaults to 1 hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Comparator used to judge search matches.
    #[serde(default, rename = "type")]
    pub comparison: ComparatorKind,
}

/// One entry of the `from` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearcherEntry {
    /// A searcher without configuration.
    Named(String),
    /// A single-key mapping of searcher name to its configuration.
    Configured(Map<String, Value>),
}

impl SearcherEntry {
    /// Searcher name and configuration block.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoverError::Config`] unless a configured entry has
    /// exactly one key.
    pub fn parts(&self) -> Result<(&str, Option<&Value>)> {
        match self {
            Self::Named(name) => Ok((name.as_str(), None)),
            Self::Configured(map) => {
                let mut iter = map.iter();
                match (iter.next(), iter.next()) {
                    (Some((name, config)), None) => Ok((name.as_str(), Some(config))),
                    _ => Err(DiscoverError::Config(format!(
                        "`from` entries must name exactly one searcher, got {}",
                        map.len()
                    ))),
                }
            }
        }
    }
}

impl DiscoverConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoverError::Config`] on syntax errors, unknown keys or
    /// an unknown `type`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DiscoverError::Config(e.to_string()))
    }

    /// Producer `(name, config)` pairs in configuration order.
    pub fn producers(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.what
            .iter()
            .flat_map(|entry| entry.iter().map(|(name, config)| (name.as_str(), config)))
    }

    /// Settings handed to the search dispatcher.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            comparison: self.comparison,
            limit: self.limit,
        }
    }

    /// Validates this configuration against the plugins in `registry`.
    ///
    /// Checks:
    /// - `what` and `from` are non-empty
    /// - each `what` and `from` mapping names exactly one plugin
    /// - every producer is registered with an input capability
    /// - every searcher name is registered, and every capable searcher
    ///   accepts its configuration block
    /// - `interval`, when set, parses
    pub fn validate(&self, registry: &PluginRegistry) -> Result<()> {
        if self.what.is_empty() {
            return Err(DiscoverError::Config(
                "`what` must list at least one input".into(),
            ));
        }
        if self.from.is_empty() {
            return Err(DiscoverError::Config(
                "`from` must list at least one searcher".into(),
            ));
        }

        // Map keys are unordered: one input per entry.
        if let Some(entry) = self.what.iter().find(|entry| entry.len() != 1) {
            return Err(DiscoverError::Config(format!(
                "`what` entries must name exactly one input, got {}",
                entry.len()
            )));
        }
        for (name, _) in self.producers() {
            if registry.input(name).is_none() {
                return Err(DiscoverError::Config(format!(
                    "unknown input plugin `{name}`"
                )));
            }
        }
        for entry in &self.from {
            let (name, block) = entry.parts()?;
            if !registry.contains(name) {
                return Err(DiscoverError::Config(format!(
                    "unknown search plugin `{name}`"
                )));
            }
            if let Some(searcher) = registry.searcher(name) {
                searcher.validate_config(block)?;
            }
        }

        if let Some(interval) = &self.interval {
            parse_interval(interval)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl DiscoverConfig {
    /// `list` input with no items, searched on `catalog`.
    pub(crate) fn example() -> Self {
        Self {
            what: vec![Map::from_iter([("list".to_owned(), Value::Array(vec![]))])],
            from: vec![SearcherEntry::Named("catalog".into())],
            limit: None,
            interval: None,
            comparison: ComparatorKind::Normal,
        }
    }
}
