//! Seed aggregation: run input producers and deduplicate their output.
//!
//! Producers run in configuration order. A producer that fails with a
//! recoverable plugin error, or returns nothing, is logged and skipped.
//! Items are deduplicated across all producers by title and by every url
//! they carry; the first occurrence wins.

pub mod list;

use std::collections::HashSet;

use discover_search::Candidate;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::context::TaskContext;
use crate::error::{DiscoverError, Result};

pub use list::ListInput;

/// Producer interface version this orchestrator speaks.
pub const SUPPORTED_API_VERSION: u8 = 2;

/// Aggregated candidate count above which a pass is considered oversized.
pub const CANDIDATE_SOFT_LIMIT: usize = 500;

/// A source of seed candidates.
pub trait InputProducer: Send + Sync {
    /// Interface version implemented by this producer.
    fn api_version(&self) -> u8 {
        SUPPORTED_API_VERSION
    }

    /// Produce candidates for this pass.
    ///
    /// # Errors
    ///
    /// Return [`DiscoverError::Plugin`] for failures that should only drop
    /// this producer's contribution.
    fn produce(&self, ctx: &TaskContext, config: &Value) -> Result<Vec<Candidate>>;
}

/// A producer entry from the `what` list, resolved against the registry.
#[derive(Clone, Copy)]
pub struct ProducerSlot<'a> {
    /// Name the producer was configured under.
    pub name: &'a str,
    /// The resolved producer.
    pub producer: &'a dyn InputProducer,
    /// The producer's own configuration block.
    pub config: &'a Value,
}

impl std::fmt::Debug for ProducerSlot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProducerSlot")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Why an item was dropped during deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duplicate {
    /// One of its urls was already seen.
    Url,
    /// Its title was already seen.
    Title,
}

/// Tracks seen titles and urls across one aggregation run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    titles: HashSet<String>,
    urls: HashSet<String>,
}

impl Deduplicator {
    /// Create an empty deduplicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `candidate` against everything seen so far. On acceptance its
    /// title and all of its urls are remembered.
    ///
    /// A url collision is checked before a title collision.
    pub fn check(&mut self, candidate: &Candidate) -> std::result::Result<(), Duplicate> {
        let urls = candidate.all_urls();
        if urls.iter().any(|url| self.urls.contains(*url)) {
            return Err(Duplicate::Url);
        }
        if self.titles.contains(&candidate.title) {
            return Err(Duplicate::Title);
        }

        self.titles.insert(candidate.title.clone());
        self.urls.extend(urls.into_iter().map(str::to_owned));
        Ok(())
    }

    /// Keep the first occurrence of every title/url from `candidates`.
    pub fn dedup(&mut self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| match self.check(candidate) {
                Ok(()) => true,
                Err(Duplicate::Url) => {
                    debug!(title = %candidate.title, "url already in candidate list, skipping");
                    false
                }
                Err(Duplicate::Title) => {
                    // Duplicates are dropped, not merged.
                    info!(title = %candidate.title, "ignored duplicate title");
                    false
                }
            })
            .collect()
    }
}

/// Run every producer and return the deduplicated candidate list.
///
/// # Errors
///
/// Returns [`DiscoverError::Config`] if a producer speaks an unsupported
/// interface version, and propagates any non-recoverable producer error.
pub fn aggregate(slots: &[ProducerSlot<'_>], ctx: &TaskContext) -> Result<Vec<Candidate>> {
    let mut dedup = Deduplicator::new();
    let mut candidates = Vec::new();

    for slot in slots {
        if slot.producer.api_version() != SUPPORTED_API_VERSION {
            return Err(DiscoverError::Config(format!(
                "plugin {} does not support API v{SUPPORTED_API_VERSION}",
                slot.name
            )));
        }

        let produced = match slot.producer.produce(ctx, slot.config) {
            Ok(produced) => produced,
            Err(err) if err.is_recoverable() => {
                warn!(producer = slot.name, error = %err, "error during input plugin");
                continue;
            }
            Err(err) => return Err(err),
        };

        if produced.is_empty() {
            warn!(producer = slot.name, "input did not return anything");
            continue;
        }

        debug!(producer = slot.name, count = produced.len(), "input produced items");
        candidates.extend(dedup.dedup(produced));
    }

    if candidates.len() > CANDIDATE_SOFT_LIMIT {
        error!(
            count = candidates.len(),
            limit = CANDIDATE_SOFT_LIMIT,
            "inputs produced too many candidates, narrow the `what` configuration"
        );
    }

    Ok(candidates)
}
