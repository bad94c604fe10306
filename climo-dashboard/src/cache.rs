//! Process-wide memoization of pipeline stage outputs.
//!
//! Entries are keyed by stage id plus the structural rendering of the
//! stage's semantic inputs, and invalidated only by key mismatch, never by
//! time. Values are shared via `Arc`, so repeated lookups for the same key
//! return the same object. The store is unbounded by default (a single
//! dashboard session touches a bounded universe of keys); a long-lived
//! multi-session host can cap it by entry count, evicting the least
//! recently used key.

use log::debug;
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Stage id plus structural key identifying one cached output
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    stage: &'static str,
    key: String,
}

struct CacheInner {
    entries: HashMap<CacheKey, Arc<dyn Any + Send + Sync>>,
    /// Keys in least-recently-used-first order
    order: Vec<CacheKey>,
}

/// Shared memoization store for pipeline stages.
///
/// Reads are safe under concurrent callers, and writes are idempotent: if
/// two callers race to compute the same key, the first stored value wins
/// and both observe it. The lock is never held while a stage computes.
pub struct PipelineCache {
    inner: Mutex<CacheInner>,
    capacity: Option<usize>,
}

impl PipelineCache {
    /// A cache that keeps every entry for the process lifetime
    pub fn unbounded() -> Self {
        PipelineCache {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: Vec::new(),
            }),
            capacity: None,
        }
    }

    /// A cache bounded to `capacity` entries with least-recently-used eviction
    pub fn bounded(capacity: usize) -> Self {
        PipelineCache {
            capacity: Some(capacity.max(1)),
            ..PipelineCache::unbounded()
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // a panic while holding the lock cannot leave a partial entry:
        // values are inserted fully formed
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached value for `(stage, key)`, refreshing its recency
    pub fn get<V: Any + Send + Sync>(&self, stage: &'static str, key: &str) -> Option<Arc<V>> {
        let mut inner = self.lock();
        let cache_key = CacheKey {
            stage,
            key: key.to_string(),
        };
        let value = inner.entries.get(&cache_key)?.clone();
        inner.order.retain(|k| *k != cache_key);
        inner.order.push(cache_key);
        value.downcast::<V>().ok()
    }

    /// Stores a value for `(stage, key)` and returns the shared handle.
    ///
    /// If the key is already present the existing value is kept and
    /// returned, so racing writers converge on one object.
    pub fn insert<V: Any + Send + Sync>(
        &self,
        stage: &'static str,
        key: impl Into<String>,
        value: V,
    ) -> Arc<V> {
        let mut inner = self.lock();
        let cache_key = CacheKey {
            stage,
            key: key.into(),
        };
        if let Some(existing) = inner.entries.get(&cache_key) {
            if let Ok(existing) = existing.clone().downcast::<V>() {
                return existing;
            }
        }
        let value = Arc::new(value);
        inner
            .entries
            .insert(cache_key.clone(), value.clone() as Arc<dyn Any + Send + Sync>);
        inner.order.retain(|k| *k != cache_key);
        inner.order.push(cache_key);
        if let Some(capacity) = self.capacity {
            while inner.order.len() > capacity {
                let evicted = inner.order.remove(0);
                inner.entries.remove(&evicted);
                debug!("Evicted cache entry {}:{}", evicted.stage, evicted.key);
            }
        }
        value
    }

    /// Returns the cached value for `(stage, key)`, computing and storing
    /// it only on a miss.
    pub fn get_or_compute<V, F>(&self, stage: &'static str, key: impl Into<String>, compute: F) -> Arc<V>
    where
        V: Any + Send + Sync,
        F: FnOnce() -> V,
    {
        let key = key.into();
        if let Some(value) = self.get::<V>(stage, &key) {
            debug!("Cache hit for {stage}:{key}");
            return value;
        }
        debug!("Cache miss for {stage}:{key}");
        let value = compute();
        self.insert(stage, key, value)
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute).
    ///
    /// Errors are returned to the caller and never cached, so a failed
    /// stage is retried on the next pass.
    pub fn try_get_or_compute<V, E, F>(
        &self,
        stage: &'static str,
        key: impl Into<String>,
        compute: F,
    ) -> Result<Arc<V>, E>
    where
        V: Any + Send + Sync,
        F: FnOnce() -> Result<V, E>,
    {
        let key = key.into();
        if let Some(value) = self.get::<V>(stage, &key) {
            debug!("Cache hit for {stage}:{key}");
            return Ok(value);
        }
        debug!("Cache miss for {stage}:{key}");
        let value = compute()?;
        Ok(self.insert(stage, key, value))
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_compute_invokes_compute_once() {
        let cache = PipelineCache::unbounded();
        let mut calls = 0;
        let first = cache.get_or_compute("stage", "key", || {
            calls += 1;
            vec![1, 2, 3]
        });
        let second = cache.get_or_compute("stage", "key", || {
            calls += 1;
            vec![9, 9, 9]
        });
        assert_eq!(calls, 1);
        assert_eq!(*second, vec![1, 2, 3]);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_keys_compute_independently() {
        let cache = PipelineCache::unbounded();
        let a = cache.get_or_compute("stage", "a", || 1_i32);
        let b = cache.get_or_compute("stage", "b", || 2_i32);
        let other_stage = cache.get_or_compute("other", "a", || 3_i32);
        assert_eq!((*a, *b, *other_stage), (1, 2, 3));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_insert_is_idempotent_first_write_wins() {
        let cache = PipelineCache::unbounded();
        let first = cache.insert("stage", "key", 10_i32);
        let second = cache.insert("stage", "key", 20_i32);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, 10);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = PipelineCache::unbounded();
        let mut calls = 0;
        let failed: Result<Arc<i32>, &str> = cache.try_get_or_compute("stage", "key", || {
            calls += 1;
            Err("upstream down")
        });
        assert!(failed.is_err());
        let recovered: Result<Arc<i32>, &str> = cache.try_get_or_compute("stage", "key", || {
            calls += 1;
            Ok(7)
        });
        assert_eq!(*recovered.unwrap(), 7);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_bounded_cache_evicts_least_recently_used() {
        let cache = PipelineCache::bounded(2);
        cache.insert("stage", "a", 1_i32);
        cache.insert("stage", "b", 2_i32);
        // touch "a" so "b" becomes the eviction candidate
        assert!(cache.get::<i32>("stage", "a").is_some());
        cache.insert("stage", "c", 3_i32);
        assert_eq!(cache.len(), 2);
        assert!(cache.get::<i32>("stage", "b").is_none());
        assert!(cache.get::<i32>("stage", "a").is_some());
        assert!(cache.get::<i32>("stage", "c").is_some());
    }
}
