//! Plugin registry: name to capability lookup.
//!
//! Producers and searchers are registered under a name once, up front.
//! Configurations are resolved against the registry before a pass starts
//! so unknown names fail fast.

use std::collections::BTreeMap;
use std::sync::Arc;

use discover_search::{Searcher, SearcherSlot};

use crate::config::DiscoverConfig;
use crate::error::{DiscoverError, Result};
use crate::inputs::{InputProducer, ListInput, ProducerSlot};

/// Capabilities a registered plugin offers.
#[derive(Clone, Default)]
pub struct RegisteredPlugin {
    input: Option<Arc<dyn InputProducer>>,
    search: Option<Arc<dyn Searcher>>,
}

impl std::fmt::Debug for RegisteredPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredPlugin")
            .field("input", &self.input.is_some())
            .field("search", &self.search.is_some())
            .finish()
    }
}

/// Registry of available plugins.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, RegisteredPlugin>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in `list` input.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_input("list", Arc::new(ListInput));
        registry
    }

    /// Register (or replace) the input capability of `name`.
    pub fn register_input(&mut self, name: impl Into<String>, producer: Arc<dyn InputProducer>) {
        self.plugins.entry(name.into()).or_default().input = Some(producer);
    }

    /// Register (or replace) the search capability of `name`.
    pub fn register_searcher(&mut self, name: impl Into<String>, searcher: Arc<dyn Searcher>) {
        self.plugins.entry(name.into()).or_default().search = Some(searcher);
    }

    /// Returns `true` if any plugin is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered plugin names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Input capability of `name`, if registered.
    pub fn input(&self, name: &str) -> Option<&dyn InputProducer> {
        self.plugins.get(name)?.input.as_deref()
    }

    /// Search capability of `name`, if registered.
    pub fn searcher(&self, name: &str) -> Option<&dyn Searcher> {
        self.plugins.get(name)?.search.as_deref()
    }

    /// Resolve the `what` list into producer slots.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoverError::Config`] for a name with no input capability.
    pub fn resolve_producers<'a>(
        &'a self,
        config: &'a DiscoverConfig,
    ) -> Result<Vec<ProducerSlot<'a>>> {
        config
            .producers()
            .map(|(name, block)| -> Result<ProducerSlot<'a>> {
                let producer = self.input(name).ok_or_else(|| {
                    DiscoverError::Config(format!("unknown input plugin `{name}`"))
                })?;
                Ok(ProducerSlot {
                    name,
                    producer,
                    config: block,
                })
            })
            .collect()
    }

    /// Resolve the `from` list into searcher slots. A registered plugin
    /// without search capability resolves to a slot with no searcher.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoverError::Config`] for an unregistered name or a
    /// malformed entry.
    pub fn resolve_searchers<'a>(
        &'a self,
        config: &'a DiscoverConfig,
    ) -> Result<Vec<SearcherSlot<'a>>> {
        config
            .from
            .iter()
            .map(|entry| -> Result<SearcherSlot<'a>> {
                let (name, block) = entry.parts()?;
                if !self.contains(name) {
                    return Err(DiscoverError::Config(format!(
                        "unknown search plugin `{name}`"
                    )));
                }
                Ok(SearcherSlot {
                    name,
                    searcher: self.searcher(name),
                    config: block,
                })
            })
            .collect()
    }
}
