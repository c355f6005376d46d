//! Final ordering of dispatched results.
//!
//! Results are ranked by `search_sort`, highest first. The sort is stable,
//! so results with equal keys keep the order in which searchers produced
//! them. Incomparable keys (NaN) are treated as equal.

use std::cmp::Ordering;

use crate::types::SearchResult;

/// Sort `results` by `search_sort` descending, preserving the relative
/// order of ties.
pub fn rank_by_search_sort(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        b.search_sort
            .partial_cmp(&a.search_sort)
            .unwrap_or(Ordering::Equal)
    });
}
