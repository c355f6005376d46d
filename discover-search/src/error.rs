//! Error types for the discover-search crate.
//!
//! Recoverable variants are expected misses and log quietly. Configuration
//! errors reject a searcher block before dispatch starts; raised during a
//! lookup they still only cost that (candidate, searcher) pair.

/// Errors that can occur while searching for candidates.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A searcher failed while looking up a candidate.
    #[error("plugin error: {0}")]
    Plugin(String),

    /// A searcher ran but had nothing usable to report.
    #[error("plugin warning: {0}")]
    Warning(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns `true` for expected per-pair failures that are not worth
    /// more than a debug log.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Plugin(_) | Self::Warning(_))
    }
}

/// Convenience type alias for discover-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
