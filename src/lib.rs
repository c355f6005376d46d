//! Discover: find items on search backends from seeds produced by inputs.
//!
//! A discovery pass runs four stages over a list of seed candidates:
//! Inputs → Interval gate → Release check → Search
//!
//! # Architecture
//!
//! - **Inputs**: run every configured producer, deduplicate by title and url
//! - **Gate**: skip titles searched within the configured interval, using
//!   durable per-title execution records
//! - **Release check**: drop candidates that are not out yet
//! - **Search**: fan every candidate out to every searcher via
//!   `discover-search`, cap results per pair, rank by `search_sort`
//!
//! Producers and searchers are looked up by name in a [`PluginRegistry`].
//! Partial failures are logged and skipped; only structural
//! misconfiguration aborts a pass.

pub mod cache;
pub mod config;
pub mod context;
pub mod discover;
pub mod error;
pub mod gate;
pub mod inputs;
pub mod interval;
pub mod registry;
pub mod release;
pub mod store;

pub use cache::DiscoverCache;
pub use config::{DiscoverConfig, SearcherEntry};
pub use context::TaskContext;
pub use discover::Discover;
pub use discover_search::{Candidate, ComparatorKind, SearchResult};
pub use error::{DiscoverError, Result};
pub use inputs::InputProducer;
pub use registry::PluginRegistry;
pub use release::{AlwaysReleased, ReleaseChecker, ReleaseDateChecker};
pub use store::{ExecutionStore, JsonFileStore, MemoryStore};
