//! Weak-keyed cache of resolved serialization trees
//!
//! Entries are keyed by field set identity and hold only a `Weak` to their field set, so the
//! cache never keeps a set alive. Entries whose set has been dropped are skipped on lookup and
//! removed by periodic sweeps.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tracing::debug;

use crate::constants::CACHE_SWEEP_INTERVAL;
use crate::model::{FieldSet, FieldSetId};
use crate::tree::SerializationTree;

/// A cached tree and the field set it was built from
struct CacheEntry {
    /// Held weakly; while any `Weak` exists the allocation, and so the id, is not reused
    key:  Weak<FieldSet>,
    tree: Arc<SerializationTree>,
}

impl CacheEntry {
    fn is_live(&self) -> bool { self.key.strong_count() > 0 }
}

/// Thread-safe cache from field set identity to serialization tree
pub struct TreeCache {
    /// Map of field set identities to cached trees
    entries:        DashMap<FieldSetId, CacheEntry>,
    /// Inserts since creation, drives the periodic sweep
    inserts:        AtomicUsize,
    /// Inserts between sweeps, zero disables automatic sweeping
    sweep_interval: usize,
}

impl TreeCache {
    /// Create a new empty cache with the default sweep interval
    pub fn new() -> Self { Self::with_sweep_interval(CACHE_SWEEP_INTERVAL) }

    /// Create a new empty cache that sweeps every `sweep_interval` inserts
    pub fn with_sweep_interval(sweep_interval: usize) -> Self {
        Self {
            entries: DashMap::new(),
            inserts: AtomicUsize::new(0),
            sweep_interval,
        }
    }

    /// Get the cached tree of `field_set`, if it is still cached
    pub fn get(&self, field_set: &Arc<FieldSet>) -> Option<Arc<SerializationTree>> {
        let entry = self.entries.get(&FieldSetId::of(field_set))?;
        (entry.is_live() && std::ptr::eq(entry.key.as_ptr(), Arc::as_ptr(field_set)))
            .then(|| Arc::clone(&entry.tree))
    }

    /// Insert or replace the tree of `field_set`; the last insert wins
    pub fn insert(&self, field_set: &Arc<FieldSet>, tree: Arc<SerializationTree>) {
        self.entries.insert(
            FieldSetId::of(field_set),
            CacheEntry {
                key: Arc::downgrade(field_set),
                tree,
            },
        );

        let inserts = self.inserts.fetch_add(1, Ordering::Relaxed) + 1;
        if inserts.checked_rem(self.sweep_interval) == Some(0) {
            self.sweep();
        }
    }

    /// Remove entries whose field set has been dropped, returning how many were removed
    pub fn sweep(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live());
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "Swept dropped field sets from tree cache");
        }
        removed
    }

    /// Number of entries, including dead ones not yet swept
    pub fn len(&self) -> usize { self.entries.len() }

    /// True when the cache holds no entries
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Remove every entry
    pub fn clear(&self) { self.entries.clear(); }
}

impl Default for TreeCache {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for TreeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeCache")
            .field("entries", &self.entries.len())
            .field("sweep_interval", &self.sweep_interval)
            .finish()
    }
}
