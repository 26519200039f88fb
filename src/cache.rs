//! Identity-keyed cache of resolved color spaces.
//!
//! Keys are object references, never structural values: two identical
//! color space arrays stored as different objects resolve to different
//! instances, while one object reused across pages resolves once.

use crate::colors::ColorSpace;
use crate::object::ObjectRef;
use std::collections::HashMap;
use std::sync::Arc;

/// Hit/miss counters of an [`ObjectGraphCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that had to resolve the descriptor.
    pub misses: usize,
    /// Number of cached instances.
    pub entries: usize,
}

/// Session-scoped cache shared by the resolvers.
#[derive(Debug, Default)]
pub struct ObjectGraphCache {
    color_spaces: HashMap<ObjectRef, Arc<ColorSpace>>,
    hits: usize,
    misses: usize,
}

impl ObjectGraphCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached instance for `key`, counting the lookup.
    pub fn get(&mut self, key: ObjectRef) -> Option<Arc<ColorSpace>> {
        match self.color_spaces.get(&key) {
            Some(color_space) => {
                self.hits += 1;
                log::trace!("Color space cache hit for {}", key);
                Some(Arc::clone(color_space))
            },
            None => {
                self.misses += 1;
                None
            },
        }
    }

    /// Cache `color_space` under `key`.
    pub fn insert(&mut self, key: ObjectRef, color_space: Arc<ColorSpace>) {
        log::trace!("Caching {} color space for {}", color_space.family(), key);
        self.color_spaces.insert(key, color_space);
    }

    /// Whether `key` has a cached instance. Does not count as a lookup.
    pub fn contains(&self, key: ObjectRef) -> bool {
        self.color_spaces.contains_key(&key)
    }

    /// Number of cached instances.
    pub fn len(&self) -> usize {
        self.color_spaces.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.color_spaces.is_empty()
    }

    /// Drop every cached instance and reset the counters.
    pub fn clear(&mut self) {
        self.color_spaces.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.color_spaces.len(),
        }
    }
}
