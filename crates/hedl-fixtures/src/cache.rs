// Dweve HEDL - Hierarchical Entity Data Language
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Memoization for decoded and parsed fixtures.
//!
//! [`MemoCache`] maps a fixture filename to a value computed at most once.
//! Entries are never evicted; the only way to drop them is [`MemoCache::clear`].
//!
//! # Thread Safety
//!
//! Hits take a shared read lock. A miss takes the write lock, checks again,
//! and runs the loader while still holding it, so two threads racing on the
//! same key never both load it. Failed loads insert nothing.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hit and miss counters for a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that ran the loader (successfully or not)
    pub misses: u64,
    /// Number of cached entries
    pub size: usize,
}

impl CacheStats {
    /// Fraction of lookups served from cache (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Unbounded get-or-insert map keyed by fixture filename.
///
/// `T` is expected to be cheap to clone, typically an `Arc`.
///
/// # Example
///
/// ```rust
/// use hedl_fixtures::MemoCache;
/// use std::sync::Arc;
///
/// let cache: MemoCache<Arc<str>> = MemoCache::new();
/// let v = cache
///     .get_or_try_insert_with("a.json", || Ok::<_, ()>(Arc::from("[]")))
///     .unwrap();
/// assert_eq!(&*v, "[]");
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoCache<T> {
    entries: RwLock<HashMap<String, T>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: Clone> MemoCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached value for `key`, if any. Does not touch the counters.
    pub fn get(&self, key: &str) -> Option<T> {
        self.entries.read().get(key).cloned()
    }

    /// Returns the cached value for `key`, or runs `load` and caches its
    /// result.
    ///
    /// # Errors
    ///
    /// Propagates the error from `load`; the cache is left unchanged.
    pub fn get_or_try_insert_with<E, F>(&self, key: &str, load: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.entries.read().get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value.clone());
        }

        let mut entries = self.entries.write();

        // Another thread may have filled it between the two locks
        if let Some(value) = entries.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = load()?;
        entries.insert(key.to_string(), value.clone());
        Ok(value)
    }

    /// Returns true if `key` is cached.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.len(),
        }
    }
}

impl<T: Clone> Default for MemoCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_cache() {
        let cache: MemoCache<u32> = MemoCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_loads_once() {
        let cache: MemoCache<Arc<String>> = MemoCache::new();
        let calls = AtomicUsize::new(0);
        let load = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(Arc::new("content".to_string()))
        };

        let first = cache.get_or_try_insert_with("f", load).unwrap();
        let second = cache.get_or_try_insert_with("f", load).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failed_load_not_cached() {
        let cache: MemoCache<u32> = MemoCache::new();

        let err = cache.get_or_try_insert_with("f", || Err("boom"));
        assert_eq!(err, Err("boom"));
        assert!(!cache.contains("f"));

        // Next call retries from scratch
        assert_eq!(cache.get_or_try_insert_with("f", || Ok::<_, &str>(7)), Ok(7));
        assert_eq!(cache.get("f"), Some(7));
    }

    #[test]
    fn test_clear() {
        let cache: MemoCache<u32> = MemoCache::new();
        cache.get_or_try_insert_with("a", || Ok::<_, ()>(1)).unwrap();
        cache.get_or_try_insert_with("a", || Ok::<_, ()>(1)).unwrap();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_hit_rate_empty() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_concurrent_single_load() {
        let cache: Arc<MemoCache<Arc<str>>> = Arc::new(MemoCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    cache
                        .get_or_try_insert_with("shared.json", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok::<_, ()>(Arc::from("{}"))
                        })
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(&*handle.join().unwrap(), "{}");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 7);
    }
}
