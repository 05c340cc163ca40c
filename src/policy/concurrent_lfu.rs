//! Thread-safe LFU cache.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                     ConcurrentLfuCache<K, V>                             │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │                 Arc<Mutex<LfuCache<K, V>>>                         │ │
//!   │   │                                                                    │ │
//!   │   │   store ─ frequency tracker ─ frequency buckets ─ metrics          │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────────────┘
//!
//!   get / put:
//!     lock ──► update all views + metrics ──► unlock ──► log eviction (if any)
//! ```
//!
//! One exclusive lock guards everything. A `get` hit changes frequency state,
//! so reads take the same lock as writes; there is no reader/writer split.
//! Each critical section does O(1) work and never logs or allocates beyond
//! the entry being inserted.
//!
//! Clones share the same underlying cache.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::builder::DEFAULT_CAPACITY;
use crate::error::InvariantError;
use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::{MetricsReset, MetricsSnapshotProvider};
use crate::policy::lfu::LfuCache;
use crate::traits::{CacheService, ConcurrentCache};

/// Mutex-guarded [`LfuCache`].
#[derive(Clone)]
pub struct ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<Mutex<LfuCache<K, V>>>,
}

impl<K, V> fmt::Debug for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentLfuCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Creates a cache with [`DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// ```
    /// use lfukit::policy::concurrent_lfu::ConcurrentLfuCache;
    ///
    /// let cache: ConcurrentLfuCache<u32, String> = ConcurrentLfuCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        tracing::debug!(capacity, "created LFU cache");
        Self {
            inner: Arc::new(Mutex::new(LfuCache::new(capacity))),
        }
    }

    /// Looks up `key`. A hit promotes the key; a miss changes nothing but the
    /// miss counter.
    ///
    /// ```
    /// use lfukit::policy::concurrent_lfu::ConcurrentLfuCache;
    ///
    /// let cache = ConcurrentLfuCache::new(2);
    /// cache.put("a", 1);
    ///
    /// assert_eq!(cache.get(&"a").as_deref(), Some(&1));
    /// assert_eq!(cache.get(&"b"), None);
    /// assert_eq!((cache.hits(), cache.misses()), (1, 1));
    /// ```
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().get(key)
    }

    /// Inserts or overwrites `key`, evicting the least frequently used entry
    /// when a new key arrives at a full cache. Returns the evicted key.
    ///
    /// ```
    /// use lfukit::policy::concurrent_lfu::ConcurrentLfuCache;
    ///
    /// let cache = ConcurrentLfuCache::new(2);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// cache.get(&"a");
    ///
    /// assert_eq!(cache.put("c", 3), Some("b"));
    /// assert_eq!(cache.evictions(), 1);
    /// ```
    pub fn put(&self, key: K, value: V) -> Option<K> {
        let evicted = self.inner.lock().put(key, value);
        if let Some(victim) = &evicted {
            tracing::debug!(key = ?victim, "evicted least frequently used entry");
        }
        evicted
    }

    /// Deletes `key`. Not counted as an eviction.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().remove(key)
    }

    /// Checks presence without counting a hit or promoting.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.lock().frequency(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Drops every entry. Metrics are kept.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn hits(&self) -> u64 {
        self.inner.lock().hits()
    }

    pub fn misses(&self) -> u64 {
        self.inner.lock().misses()
    }

    pub fn evictions(&self) -> u64 {
        self.inner.lock().evictions()
    }

    pub fn insertions(&self) -> u64 {
        self.inner.lock().insertions()
    }

    /// Mean wall-clock time per `put`, `None` before the first one.
    pub fn avg_insertion_time(&self) -> Option<Duration> {
        self.inner.lock().avg_insertion_time()
    }

    /// Counters and gauges read under one lock acquisition.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }

    /// Owned copy of the key → value view.
    pub fn snapshot_store(&self) -> HashMap<K, Arc<V>> {
        self.inner.lock().snapshot_store()
    }

    /// Owned copy of the key → frequency view.
    pub fn snapshot_frequencies(&self) -> HashMap<K, u64> {
        self.inner.lock().snapshot_frequencies()
    }

    /// Owned copy of the frequency → keys view, keys oldest first.
    ///
    /// ```
    /// use lfukit::policy::concurrent_lfu::ConcurrentLfuCache;
    ///
    /// let cache = ConcurrentLfuCache::new(4);
    /// cache.put("a", ());
    /// cache.put("b", ());
    /// cache.get(&"a");
    ///
    /// let buckets = cache.snapshot_buckets();
    /// assert_eq!(buckets[&1], vec!["b"]);
    /// assert_eq!(buckets[&2], vec!["a"]);
    /// ```
    pub fn snapshot_buckets(&self) -> BTreeMap<u64, Vec<K>> {
        self.inner.lock().snapshot_buckets()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> MetricsReset for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn reset_metrics(&self) {
        self.inner.lock().reset_metrics();
    }
}

impl<K, V> CacheService<K, V> for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn name(&self) -> &'static str {
        "lfu"
    }

    fn get(&self, key: &K) -> Option<Arc<V>> {
        ConcurrentLfuCache::get(self, key)
    }

    fn put(&self, key: K, value: V) {
        ConcurrentLfuCache::put(self, key, value);
    }

    fn hits(&self) -> u64 {
        ConcurrentLfuCache::hits(self)
    }

    fn misses(&self) -> u64 {
        ConcurrentLfuCache::misses(self)
    }

    fn evictions(&self) -> u64 {
        ConcurrentLfuCache::evictions(self)
    }

    fn insertions(&self) -> u64 {
        ConcurrentLfuCache::insertions(self)
    }

    fn avg_insertion_time(&self) -> Option<Duration> {
        ConcurrentLfuCache::avg_insertion_time(self)
    }

    fn len(&self) -> usize {
        ConcurrentLfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        ConcurrentLfuCache::capacity(self)
    }

    fn snapshot_store(&self) -> HashMap<K, Arc<V>> {
        ConcurrentLfuCache::snapshot_store(self)
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        ConcurrentLfuCache::metrics_snapshot(self)
    }
}

impl<K, V> ConcurrentCache for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
}
