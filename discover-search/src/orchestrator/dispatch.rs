//! Core search dispatcher: per-pair fan-out, truncation, rank.
//!
//! Runs every configured searcher against every candidate, one pair at a
//! time, keeps up to `limit` results per pair, and returns the merged list
//! ranked by `search_sort`.

use serde_json::Value;

use crate::config::SearchConfig;
use crate::engine::Searcher;
use crate::error::SearchError;
use crate::types::{Candidate, SearchResult};

use super::ranking::rank_by_search_sort;

/// A searcher entry from the `from` list, resolved against the registry.
///
/// `searcher` is `None` when the named plugin exists but has no search
/// capability; such slots are logged and skipped.
#[derive(Clone, Copy)]
pub struct SearcherSlot<'a> {
    /// Name the searcher was configured under.
    pub name: &'a str,
    /// The resolved search capability, if any.
    pub searcher: Option<&'a dyn Searcher>,
    /// The searcher's own configuration block.
    pub config: Option<&'a Value>,
}

impl std::fmt::Debug for SearcherSlot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearcherSlot")
            .field("name", &self.name)
            .field("capable", &self.searcher.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Check every capable slot's configuration block.
///
/// # Errors
///
/// Returns the first [`SearchError::Config`] a searcher reports.
pub fn validate_slots(slots: &[SearcherSlot<'_>]) -> Result<(), SearchError> {
    for slot in slots {
        if let Some(searcher) = slot.searcher {
            searcher.validate_config(slot.config)?;
        }
    }
    Ok(())
}

/// Dispatch every candidate to every searcher and rank the merged results.
///
/// # Pipeline
///
/// 1. Validate every slot's configuration block
/// 2. Build the comparator selected by `config.comparison`
/// 3. For each searcher slot, skip it (error log) if it cannot search
/// 4. For each candidate, call the searcher; keep up to `config.limit`
///    of its results
/// 5. Any searcher error counts as zero results for that pair
/// 6. Stable-sort everything by `search_sort` descending
///
/// # Errors
///
/// Returns [`SearchError::Config`] if a slot's configuration block is
/// rejected. Nothing is searched in that case; once searching starts the
/// dispatch always completes.
pub fn dispatch(
    candidates: &[Candidate],
    slots: &[SearcherSlot<'_>],
    config: &SearchConfig,
) -> Result<Vec<SearchResult>, SearchError> {
    validate_slots(slots)?;
    let comparator = config.comparison.comparator();

    let mut all_results: Vec<SearchResult> = Vec::new();

    for slot in slots {
        let Some(searcher) = slot.searcher else {
            tracing::error!(
                searcher = slot.name,
                "search plugin does not implement a search operation, skipping"
            );
            continue;
        };

        for candidate in candidates {
            match searcher.search(candidate, &comparator, slot.config) {
                Ok(found) => {
                    tracing::debug!(
                        searcher = slot.name,
                        count = found.len(),
                        "discovered entries"
                    );
                    let keep = config.limit.unwrap_or(found.len());
                    all_results.extend(found.into_iter().take(keep));
                }
                Err(err) if err.is_recoverable() => {
                    tracing::debug!(
                        searcher = slot.name,
                        title = %candidate.title,
                        error = %err,
                        "no results"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        searcher = slot.name,
                        title = %candidate.title,
                        error = %err,
                        "searcher failed, skipping"
                    );
                }
            }
        }
    }

    rank_by_search_sort(&mut all_results);
    Ok(all_results)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::comparator::{Comparator, ComparatorKind};
    use std::sync::Mutex;

    /// Returns `sorts` as results titled after the candidate.
    struct FixedSearcher {
        sorts: Vec<f64>,
    }

    impl Searcher for FixedSearcher {
        fn search(
            &self,
            candidate: &Candidate,
            _comparator: &Comparator,
            _config: Option<&Value>,
        ) -> Result<Vec<SearchResult>, SearchError> {
            Ok(self
                .sorts
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let title = format!("{} #{i}", candidate.title);
                    SearchResult::from_entry(Candidate::new(title), *s)
                })
                .collect())
        }
    }

    struct FailingSearcher(fn() -> SearchError);

    impl Searcher for FailingSearcher {
        fn search(
            &self,
            _candidate: &Candidate,
            _comparator: &Comparator,
            _config: Option<&Value>,
        ) -> Result<Vec<SearchResult>, SearchError> {
            Err((self.0)())
        }
    }

    /// Records the comparator and config it was called with. Rejects any
    /// config block when `reject` is set.
    #[derive(Default)]
    struct RecordingSearcher {
        reject: bool,
        seen: Mutex<Vec<(String, Comparator, Option<Value>)>>,
    }

    impl Searcher for RecordingSearcher {
        fn search(
            &self,
            candidate: &Candidate,
            comparator: &Comparator,
            config: Option<&Value>,
        ) -> Result<Vec<SearchResult>, SearchError> {
            self.seen.lock().unwrap().push((
                candidate.title.clone(),
                comparator.clone(),
                config.cloned(),
            ));
            Ok(vec![])
        }

        fn validate_config(&self, config: Option<&Value>) -> Result<(), SearchError> {
            match config {
                Some(block) if self.reject => {
                    Err(SearchError::Config(format!("unusable block {block}")))
                }
                _ => Ok(()),
            }
        }
    }

    fn slot<'a>(name: &'a str, searcher: &'a dyn Searcher) -> SearcherSlot<'a> {
        SearcherSlot {
            name,
            searcher: Some(searcher),
            config: None,
        }
    }

    #[test]
    fn results_ranked_descending() {
        let searcher = FixedSearcher {
            sorts: vec![3.0, 1.0, 2.0],
        };
        let results = dispatch(
            &[Candidate::new("A")],
            &[slot("fixed", &searcher)],
            &SearchConfig::default(),
        )
        .unwrap();
        let sorts: Vec<f64> = results.iter().map(|r| r.search_sort).collect();
        assert_eq!(sorts, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn limit_applies_per_pair() {
        let searcher = FixedSearcher {
            sorts: vec![5.0, 4.0, 3.0, 2.0, 1.0],
        };
        let config = SearchConfig {
            limit: Some(2),
            ..Default::default()
        };
        let results = dispatch(
            &[Candidate::new("A"), Candidate::new("B")],
            &[slot("fixed", &searcher)],
            &config,
        )
        .unwrap();
        // 2 per candidate, not 2 overall.
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.search_sort >= 4.0));
    }

    #[test]
    fn failing_searcher_does_not_block_others() {
        let failing = FailingSearcher(|| SearchError::Plugin("down".into()));
        let warning = FailingSearcher(|| SearchError::Warning("nothing".into()));
        let good = FixedSearcher { sorts: vec![1.0] };
        let results = dispatch(
            &[Candidate::new("A"), Candidate::new("B")],
            &[slot("bad", &failing), slot("good", &good), slot("meh", &warning)],
            &SearchConfig::default(),
        )
        .unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn config_error_during_search_only_skips_pair() {
        let broken = FailingSearcher(|| SearchError::Config("bad api key".into()));
        let good = FixedSearcher { sorts: vec![1.0] };
        let results = dispatch(
            &[Candidate::new("A")],
            &[slot("broken", &broken), slot("good", &good)],
            &SearchConfig::default(),
        )
        .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn rejected_slot_config_aborts_before_searching() {
        let recorder = RecordingSearcher {
            reject: true,
            ..Default::default()
        };
        let block = serde_json::json!({"category": 3});
        let slots = [SearcherSlot {
            name: "rec",
            searcher: Some(&recorder),
            config: Some(&block),
        }];
        let err = dispatch(&[Candidate::new("A")], &slots, &SearchConfig::default()).unwrap_err();
        assert!(!err.is_recoverable());
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn slot_without_capability_is_skipped() {
        let good = FixedSearcher { sorts: vec![1.0] };
        let slots = [
            SearcherSlot {
                name: "input_only",
                searcher: None,
                config: None,
            },
            slot("good", &good),
        ];
        let results = dispatch(&[Candidate::new("A")], &slots, &SearchConfig::default()).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn passes_selected_comparator_and_slot_config() {
        let recorder = RecordingSearcher::default();
        let block = serde_json::json!({"category": "tv"});
        let slots = [SearcherSlot {
            name: "rec",
            searcher: Some(&recorder),
            config: Some(&block),
        }];
        let config = SearchConfig {
            comparison: ComparatorKind::Exact,
            limit: None,
        };
        dispatch(&[Candidate::new("A"), Candidate::new("B")], &slots, &config).unwrap();

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "A");
        assert_eq!(seen[1].0, "B");
        assert!(matches!(seen[0].1, Comparator::Exact(_)));
        assert_eq!(seen[0].2.as_ref(), Some(&block));
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let searcher = FixedSearcher {
            sorts: vec![3.0, 2.0],
        };
        let config = SearchConfig {
            limit: Some(0),
            ..Default::default()
        };
        let results = dispatch(&[Candidate::new("A")], &[slot("fixed", &searcher)], &config)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn no_candidates_yields_empty() {
        let good = FixedSearcher { sorts: vec![1.0] };
        let results = dispatch(&[], &[slot("good", &good)], &SearchConfig::default()).unwrap();
        assert!(results.is_empty());
    }
}
