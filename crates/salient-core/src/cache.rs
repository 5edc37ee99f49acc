//! Bounded explanation cache
//!
//! One lock-guarded map owned by the engine and shared with request
//! handlers through it. Lookup and insert are separate operations: two
//! concurrent misses on the same key may both compute and the last writer
//! wins. Values are deterministic per key, so the duplicated work is
//! wasted but never wrong, and the map itself cannot be corrupted.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

/// Default bound on cached explanation vectors.
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// Cache of explanation vectors keyed by canonical encoded-row keys,
/// evicting the oldest entry once the bound is reached.
#[derive(Debug)]
pub struct ShapCache {
    inner: Mutex<CacheInner>,
    max_entries: usize,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, Arc<[f64]>>,
    order: VecDeque<String>,
}

impl ShapCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<[f64]>> {
        self.inner.lock().entries.get(key).cloned()
    }

    /// Insert an entry, evicting oldest-first once the bound is reached.
    /// Re-inserting an existing key overwrites it in place.
    pub fn insert(&self, key: String, values: Vec<f64>) -> Arc<[f64]> {
        let values: Arc<[f64]> = values.into();
        let mut inner = self.inner.lock();
        if inner.entries.insert(key.clone(), Arc::clone(&values)).is_none() {
            inner.order.push_back(key);
            while inner.entries.len() > self.max_entries {
                match inner.order.pop_front() {
                    Some(oldest) => {
                        inner.entries.remove(&oldest);
                        debug!(key = %oldest, "evicted oldest cache entry");
                    }
                    None => break,
                }
            }
        }
        values
    }

    /// Drop every entry unconditionally. Clearing an empty cache is a
    /// successful no-op.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ShapCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}
