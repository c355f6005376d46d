//! Error types for the discover orchestrator.

use discover_search::SearchError;

/// Top-level error type for a discovery pass.
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    /// Structural misconfiguration; aborts the whole pass.
    #[error("config error: {0}")]
    Config(String),

    /// An input producer failed; only its own contribution is lost.
    #[error("plugin error: {0}")]
    Plugin(String),

    /// Execution record persistence error.
    #[error("store error: {0}")]
    Store(String),

    /// Search dispatch error.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiscoverError {
    /// Returns `true` when the error only affects a single collaborator
    /// call and the pass should continue without it.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Plugin(_) => true,
            Self::Search(inner) => inner.is_recoverable(),
            Self::Config(_) | Self::Store(_) | Self::Io(_) => false,
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, DiscoverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_variants() {
        assert_eq!(
            DiscoverError::Config("unknown plugin `x`".into()).to_string(),
            "config error: unknown plugin `x`"
        );
        assert_eq!(
            DiscoverError::Plugin("feed timed out".into()).to_string(),
            "plugin error: feed timed out"
        );
        assert_eq!(
            DiscoverError::Store("cannot write".into()).to_string(),
            "store error: cannot write"
        );
    }

    #[test]
    fn search_errors_are_transparent() {
        let err: DiscoverError = SearchError::Config("bad category".into()).into();
        assert_eq!(err.to_string(), "config error: bad category");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn recoverability() {
        assert!(DiscoverError::Plugin("x".into()).is_recoverable());
        assert!(DiscoverError::Search(SearchError::Warning("x".into())).is_recoverable());
        assert!(!DiscoverError::Config("x".into()).is_recoverable());
        assert!(!DiscoverError::Store("x".into()).is_recoverable());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiscoverError>();
    }
}
