//! Trait definition for pluggable search backends.
//!
//! Each backend implements [`Searcher`] to look a [`Candidate`] up on its
//! source and report the matches its [`Comparator`] accepts.

use serde_json::Value;

use crate::comparator::Comparator;
use crate::error::SearchError;
use crate::types::{Candidate, SearchResult};

/// A pluggable search backend.
///
/// Implementors are responsible for:
///
/// - Querying their source for `candidate`
/// - Judging each prospective match with `comparator`
/// - Setting `search_sort` on every returned [`SearchResult`]
///
/// Calls are blocking and run one at a time; the dispatcher imposes no
/// timeout of its own.
pub trait Searcher: Send + Sync {
    /// Look up `candidate` and return the accepted matches.
    ///
    /// `config` is the searcher's own configuration block, or `None` when
    /// it was listed by bare name.
    ///
    /// # Errors
    ///
    /// Any error only affects this candidate: the dispatcher logs it and
    /// moves on. Configuration problems belong in
    /// [`Searcher::validate_config`].
    fn search(
        &self,
        candidate: &Candidate,
        comparator: &Comparator,
        config: Option<&Value>,
    ) -> Result<Vec<SearchResult>, SearchError>;

    /// Check this searcher's configuration block before anything runs.
    ///
    /// The default accepts any block.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is unusable.
    fn validate_config(&self, config: Option<&Value>) -> Result<(), SearchError> {
        let _ = config;
        Ok(())
    }
}

impl<T: Searcher + ?Sized> Searcher for std::sync::Arc<T> {
    fn search(
        &self,
        candidate: &Candidate,
        comparator: &Comparator,
        config: Option<&Value>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        (**self).search(candidate, comparator, config)
    }

    fn validate_config(&self, config: Option<&Value>) -> Result<(), SearchError> {
        (**self).validate_config(config)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::comparator::ComparatorKind;
    use std::sync::Arc;

    /// A mock searcher for testing trait bounds and dispatch through `Arc`.
    struct MockSearcher {
        results: Vec<SearchResult>,
    }

    impl Searcher for MockSearcher {
        fn search(
            &self,
            _candidate: &Candidate,
            _comparator: &Comparator,
            _config: Option<&Value>,
        ) -> Result<Vec<SearchResult>, SearchError> {
            if self.results.is_empty() {
                return Err(SearchError::Warning("mock searcher found nothing".into()));
            }
            Ok(self.results.clone())
        }
    }

    #[test]
    fn mock_searcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockSearcher>();
    }

    #[test]
    fn mock_searcher_returns_results() {
        let searcher = MockSearcher {
            results: vec![SearchResult::from_entry(Candidate::new("Test"), 1.0)],
        };
        let comparator = ComparatorKind::Any.comparator();

        let results = searcher
            .search(&Candidate::new("Test"), &comparator, None)
            .expect("should succeed");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Test");
    }

    #[test]
    fn default_validate_config_accepts_anything() {
        let searcher = MockSearcher { results: vec![] };
        assert!(searcher.validate_config(None).is_ok());
        assert!(searcher
            .validate_config(Some(&serde_json::json!({"any": [1, 2]})))
            .is_ok());
    }

    #[test]
    fn arc_delegates_to_inner_searcher() {
        let searcher: Arc<dyn Searcher> = Arc::new(MockSearcher { results: vec![] });
        let comparator = ComparatorKind::Any.comparator();

        let err = searcher
            .search(&Candidate::new("Test"), &comparator, None)
            .unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("found nothing"));
    }
}
