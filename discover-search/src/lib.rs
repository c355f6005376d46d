//! # discover-search
//!
//! Searcher fan-out, title comparison and ranking for the discover
//! orchestrator.
//!
//! Given deduplicated seed [`Candidate`]s, this crate asks every configured
//! [`Searcher`] to look each one up, judges prospective matches with a
//! config-selected [`Comparator`], and merges everything into a single list
//! ranked by `search_sort`.
//!
//! ## Design
//!
//! - Searchers are plain blocking trait objects, invoked one pair at a time
//! - Searcher config blocks are checked before anything is searched
//! - A failing searcher only loses its own (candidate, searcher) pair
//! - `limit` caps results per pair, not overall
//! - Ranking is a stable descending sort, so ties keep discovery order

pub mod comparator;
pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod orchestrator;
pub mod types;

pub use comparator::{clean_title, Comparator, ComparatorKind, Judgment};
pub use config::SearchConfig;
pub use engine::Searcher;
pub use error::{Result, SearchError};
pub use orchestrator::dispatch::{validate_slots, SearcherSlot};
pub use types::{Candidate, SearchResult};

/// Search for `candidates` on every searcher in `slots`.
///
/// Validates every slot's configuration block, then runs the dispatcher.
/// Individual searcher failures are logged and skipped; the returned list
/// is ranked by `search_sort`, highest first.
///
/// # Errors
///
/// Returns [`SearchError::Config`] when a searcher rejects its
/// configuration block.
///
/// # Examples
///
/// ```
/// use discover_search::engines::CatalogSearcher;
/// use discover_search::{Candidate, SearchConfig, SearcherSlot};
///
/// let catalog = CatalogSearcher::new(vec![Candidate::new("Show.S01E01.720p")]);
/// let slots = [SearcherSlot { name: "catalog", searcher: Some(&catalog), config: None }];
/// let wanted = [Candidate::new("Show S01E01")];
/// let results = discover_search::search(&wanted, &slots, &SearchConfig::default())?;
/// assert_eq!(results.len(), 1);
/// # Ok::<(), discover_search::SearchError>(())
/// ```
pub fn search(
    candidates: &[Candidate],
    slots: &[SearcherSlot<'_>],
    config: &SearchConfig,
) -> Result<Vec<SearchResult>> {
    orchestrator::dispatch::dispatch(candidates, slots, config)
}
