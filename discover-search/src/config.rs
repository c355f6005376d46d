//! Dispatch configuration.
//!
//! [`SearchConfig`] selects the comparator and caps how many results each
//! (candidate, searcher) pair may contribute.

use crate::comparator::ComparatorKind;

/// Configuration for one search dispatch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchConfig {
    /// Which comparator searchers receive.
    pub comparison: ComparatorKind,
    /// Maximum results kept per (candidate, searcher) pair. `None` keeps
    /// all and `Some(0)` keeps none.
    pub limit: Option<usize>,
}
