//! Top-level discovery pass.
//!
//! SeedAggregator → ExecutionGate → ReleaseFilter → SearchDispatcher.
//! Each stage consumes the previous stage's list; only the dispatcher can
//! grow it. Configuration errors propagate unchanged; collaborator
//! failures are absorbed by the stage that called them.

use discover_search::SearchResult;
use tracing::info;

use crate::cache::{CacheKey, DiscoverCache};
use crate::config::DiscoverConfig;
use crate::context::TaskContext;
use crate::error::Result;
use crate::registry::PluginRegistry;
use crate::release::{filter_released, AlwaysReleased, ReleaseChecker};
use crate::store::ExecutionStore;
use crate::{gate, inputs};

/// Discovery orchestrator owning its registry, execution records and
/// release checker.
pub struct Discover<S> {
    registry: PluginRegistry,
    store: S,
    release: Box<dyn ReleaseChecker>,
    cache: DiscoverCache,
}

impl<S: ExecutionStore> Discover<S> {
    /// Create an orchestrator that treats every candidate as released.
    pub fn new(registry: PluginRegistry, store: S) -> Self {
        Self {
            registry,
            store,
            release: Box::new(AlwaysReleased),
            cache: DiscoverCache::default(),
        }
    }

    /// Use `checker` for the release stage.
    #[must_use]
    pub fn with_release_checker(mut self, checker: impl ReleaseChecker + 'static) -> Self {
        self.release = Box::new(checker);
        self
    }

    /// Use `cache` for [`Discover::discover_cached`].
    #[must_use]
    pub fn with_cache(mut self, cache: DiscoverCache) -> Self {
        self.cache = cache;
        self
    }

    /// The plugin registry.
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// The execution record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the orchestrator, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Run one discovery pass and return results ranked by `search_sort`.
    ///
    /// # Errors
    ///
    /// Returns a config error for any structural misconfiguration (unknown
    /// plugin, unsupported producer version, bad interval, a searcher
    /// block its searcher rejects) and a store error if execution records
    /// cannot be persisted. All of these surface before any record is
    /// written, except store errors. Producer and searcher failures are
    /// logged and skipped.
    pub fn discover(
        &mut self,
        config: &DiscoverConfig,
        ctx: &TaskContext,
    ) -> Result<Vec<SearchResult>> {
        config.validate(&self.registry)?;
        let producers = self.registry.resolve_producers(config)?;
        let searchers = self.registry.resolve_searchers(config)?;

        let candidates = inputs::aggregate(&producers, ctx)?;
        info!(task = %ctx.task, count = candidates.len(), "discovering titles");

        let candidates = gate::filter(
            candidates,
            config.interval.as_deref(),
            ctx.run_now,
            &mut self.store,
        )?;
        let candidates = filter_released(self.release.as_ref(), ctx, candidates, config)?;

        let results = discover_search::search(&candidates, &searchers, &config.search_config())?;
        info!(
            task = %ctx.task,
            searched = candidates.len(),
            found = results.len(),
            "discovery finished"
        );
        Ok(results)
    }

    /// [`Discover::discover`], memoised per task and configuration.
    ///
    /// A cache hit returns the stored results without running any stage.
    pub fn discover_cached(
        &mut self,
        config: &DiscoverConfig,
        ctx: &TaskContext,
    ) -> Result<Vec<SearchResult>> {
        let key = CacheKey::new(&ctx.task, config)?;
        if let Some(hit) = self.cache.get(&key) {
            info!(task = %ctx.task, count = hit.len(), "using cached discovery results");
            return Ok(hit);
        }

        let results = self.discover(config, ctx)?;
        self.cache.insert(key, results.clone());
        Ok(results)
    }
}

impl<S> std::fmt::Debug for Discover<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discover")
            .field("registry", &self.registry)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
