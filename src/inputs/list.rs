//! `list` input: candidates written out in the configuration itself.
//!
//! ```toml
//! [[what]]
//! list = [
//!   { title = "Show S01E01", url = "http://example.com/s01e01" },
//!   { title = "Movie 2010" },
//! ]
//! ```

use discover_search::Candidate;
use serde_json::Value;

use super::InputProducer;
use crate::context::TaskContext;
use crate::error::{DiscoverError, Result};

/// Emits the candidates listed in its configuration block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListInput;

impl InputProducer for ListInput {
    fn produce(&self, _ctx: &TaskContext, config: &Value) -> Result<Vec<Candidate>> {
        serde_json::from_value(config.clone()).map_err(|e| {
            DiscoverError::Config(format!("list input expects an array of entries: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn emits_configured_entries_in_order() {
        let config = json!([
            {"title": "Show S01E01", "url": "http://a/1", "urls": ["http://b/1"]},
            {"title": "Movie 2010", "imdb_id": "tt1"}
        ]);
        let out = ListInput.produce(&TaskContext::new("t"), &config).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Show S01E01");
        assert_eq!(out[0].all_urls(), vec!["http://a/1", "http://b/1"]);
        assert_eq!(out[1].fields["imdb_id"], "tt1");
    }

    #[test]
    fn empty_list_is_empty() {
        let out = ListInput.produce(&TaskContext::new("t"), &json!([])).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn entry_without_title_is_config_error() {
        let err = ListInput
            .produce(&TaskContext::new("t"), &json!([{"url": "http://a"}]))
            .unwrap_err();
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("list input"));
    }

    #[test]
    fn speaks_current_api() {
        assert_eq!(ListInput.api_version(), super::super::SUPPORTED_API_VERSION);
    }
}
