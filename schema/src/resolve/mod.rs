//! Field set to serialization tree resolution
//!
//! `SerializationTreeResolver` walks a field set in declaration order, builds one schema field
//! per accepted field and recurses into nested record sets. Results are cached per field set
//! identity, so resolving the same set again does no per-field work.
//!
//! Cycles are cut with `NestedSchema::Recursive` markers and deep nesting with
//! `NestedSchema::Truncated`. Nested subtrees whose shape depends on where resolution started
//! are returned but not cached.

mod context;
mod filter;
mod tree_cache;

use std::sync::Arc;

use context::ResolutionContext;
pub use filter::{AcceptAllFields, FieldFilter, SchemaPathsOnly};
use serde::{Deserialize, Serialize};
pub use tree_cache::TreeCache;

use crate::constants::{CACHE_SWEEP_INTERVAL, MAX_NESTING_DEPTH};
use crate::factory::{FieldSchemaBuilder, SchemaFieldFactory};
use crate::model::FieldSet;
use crate::tree::SerializationTree;

/// Resolver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Nested record levels expanded before a subtree is truncated
    pub max_depth:      usize,
    /// Cache inserts between sweeps of dropped field sets, zero disables sweeping
    pub sweep_interval: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth:      MAX_NESTING_DEPTH,
            sweep_interval: CACHE_SWEEP_INTERVAL,
        }
    }
}

/// Resolves field sets to cached serialization trees
///
/// Safe to share between threads. Concurrent resolutions of the same set may both compute the
/// tree; the last cache insert wins and every caller receives a complete tree.
pub struct SerializationTreeResolver<B = SchemaFieldFactory> {
    builder: B,
    filter:  Arc<dyn FieldFilter>,
    cache:   TreeCache,
    config:  ResolverConfig,
}

impl<B: FieldSchemaBuilder> SerializationTreeResolver<B> {
    /// Create a resolver around `builder` with the default configuration
    pub fn new(builder: B) -> Self { Self::with_config(builder, ResolverConfig::default()) }

    /// Create a resolver around `builder`
    pub fn with_config(builder: B, config: ResolverConfig) -> Self {
        Self {
            builder,
            filter: Arc::new(AcceptAllFields),
            cache: TreeCache::with_sweep_interval(config.sweep_interval),
            config,
        }
    }

    /// Only build fields accepted by `filter`
    #[must_use]
    pub fn with_filter(mut self, filter: impl FieldFilter + 'static) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    /// Resolve the serialization tree of `field_set`
    pub fn resolve(&self, field_set: &Arc<FieldSet>) -> Arc<SerializationTree> {
        ResolutionContext::new(self).resolve(field_set)
    }

    /// The tree cache
    pub const fn cache(&self) -> &TreeCache { &self.cache }

    /// The field schema builder
    pub const fn builder(&self) -> &B { &self.builder }

    /// The configuration the resolver was built with
    pub const fn config(&self) -> &ResolverConfig { &self.config }

    fn filter(&self) -> &dyn FieldFilter { self.filter.as_ref() }
}

impl Default for SerializationTreeResolver<SchemaFieldFactory> {
    fn default() -> Self { Self::new(SchemaFieldFactory::default()) }
}

impl<B: std::fmt::Debug> std::fmt::Debug for SerializationTreeResolver<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializationTreeResolver")
            .field("builder", &self.builder)
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
