//! Built-in searcher implementations.
//!
//! Each module provides a struct implementing [`crate::engine::Searcher`].

pub mod catalog;

pub use catalog::CatalogSearcher;
