//! LRU comparison backend built on [`moka`].
//!
//! Exposes the same surface as the LFU cache ([`CacheService`]) so benchmarks
//! and cross-policy tests can run both. It is never used by the LFU engine.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                                  │
//!   │                                                                          │
//!   │   moka::sync::Cache<K, Arc<V>>                                           │
//!   │     ├── max_capacity        (entry count)                                │
//!   │     ├── time_to_idle        (optional maximum idle time)                 │
//!   │     ├── EvictionPolicy::lru                                              │
//!   │     └── eviction_listener ──► LruStats.evictions + debug! event          │
//!   │                                                                          │
//!   │   LruStats (atomics): hits, misses, insertions, insertion time           │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! moka keeps no hit/miss statistics, so they are counted here. Its size and
//! idle evictions are applied lazily by background maintenance; call
//! [`LruCache::run_pending_tasks`] to force them before asserting on `len`.
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lru::LruCache;
//!
//! let cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);
//! cache.run_pending_tasks();
//!
//! assert!(cache.len() <= 2);
//! assert_eq!(cache.hits(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;

use crate::metrics::metrics_impl::average;
use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::{MetricsReset, MetricsSnapshotProvider};
use crate::traits::{CacheService, ConcurrentCache};

#[derive(Debug, Default)]
struct LruStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    insertions: AtomicU64,
    insertion_nanos: AtomicU64,
}

/// Adds `n` to `counter`, stopping at `u64::MAX`.
fn saturating_add(counter: &AtomicU64, n: u64) {
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        Some(current.saturating_add(n))
    });
}

impl LruStats {
    fn insertion_time_total(&self) -> Duration {
        Duration::from_nanos(self.insertion_nanos.load(Ordering::Relaxed))
    }

    fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.insertions.store(0, Ordering::Relaxed);
        self.insertion_nanos.store(0, Ordering::Relaxed);
    }
}

/// Size- and idle-time-bounded LRU cache.
#[derive(Clone)]
pub struct LruCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    inner: Cache<K, Arc<V>>,
    capacity: usize,
    idle_timeout: Option<Duration>,
    stats: Arc<LruStats>,
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.inner.entry_count())
            .field("capacity", &self.capacity)
            .field("idle_timeout", &self.idle_timeout)
            .finish_non_exhaustive()
    }
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Creates a cache holding at most `capacity` entries, with no idle expiry.
    pub fn new(capacity: usize) -> Self {
        Self::with_idle_timeout(capacity, None)
    }

    /// Creates a cache that also drops entries not read or written for
    /// `idle_timeout`.
    pub fn with_idle_timeout(capacity: usize, idle_timeout: Option<Duration>) -> Self {
        let stats = Arc::new(LruStats::default());
        let listener_stats = Arc::clone(&stats);

        let mut builder = Cache::builder()
            .max_capacity(capacity as u64)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(move |key: Arc<K>, _value, cause: RemovalCause| {
                if cause.was_evicted() {
                    saturating_add(&listener_stats.evictions, 1);
                    tracing::debug!(key = ?key, cause = ?cause, "evicted LRU entry");
                }
            });
        if let Some(idle) = idle_timeout {
            builder = builder.time_to_idle(idle);
        }

        tracing::debug!(capacity, ?idle_timeout, "created LRU cache");
        Self {
            inner: builder.build(),
            capacity,
            idle_timeout,
            stats,
        }
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let value = self.inner.get(key);
        let counter = if value.is_some() {
            &self.stats.hits
        } else {
            &self.stats.misses
        };
        saturating_add(counter, 1);
        value
    }

    pub fn put(&self, key: K, value: V) {
        let started = Instant::now();
        self.inner.insert(key, Arc::new(value));
        let elapsed = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);

        saturating_add(&self.stats.insertions, 1);
        saturating_add(&self.stats.insertion_nanos, elapsed);
    }

    /// Deletes `key`. Not counted as an eviction.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Applies pending size and idle evictions.
    pub fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks();
    }

    /// Entry count as last reported by moka. May briefly exceed the capacity
    /// until [`run_pending_tasks`](Self::run_pending_tasks) runs.
    pub fn len(&self) -> usize {
        usize::try_from(self.inner.entry_count()).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout
    }

    pub fn hits(&self) -> u64 {
        self.stats.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.stats.misses.load(Ordering::Relaxed)
    }

    /// Size and idle evictions. Explicit removals and overwrites are excluded.
    pub fn evictions(&self) -> u64 {
        self.stats.evictions.load(Ordering::Relaxed)
    }

    pub fn insertions(&self) -> u64 {
        self.stats.insertions.load(Ordering::Relaxed)
    }

    /// Mean wall-clock time per `put`, `None` before the first one.
    pub fn avg_insertion_time(&self) -> Option<Duration> {
        average(self.stats.insertion_time_total(), self.insertions())
    }

    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            hits: self.hits(),
            misses: self.misses(),
            evictions: self.evictions(),
            insertions: self.insertions(),
            insertion_time_total: self.stats.insertion_time_total(),
            len: self.len(),
            capacity: self.capacity,
        }
    }

    /// Owned copy of the live entries.
    pub fn snapshot_store(&self) -> HashMap<K, Arc<V>> {
        self.inner
            .iter()
            .map(|(key, value)| (K::clone(&key), value))
            .collect()
    }
}

impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> MetricsReset for LruCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn reset_metrics(&self) {
        self.stats.reset();
    }
}

impl<K, V> CacheService<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "lru"
    }

    fn get(&self, key: &K) -> Option<Arc<V>> {
        LruCache::get(self, key)
    }

    fn put(&self, key: K, value: V) {
        LruCache::put(self, key, value);
    }

    fn hits(&self) -> u64 {
        LruCache::hits(self)
    }

    fn misses(&self) -> u64 {
        LruCache::misses(self)
    }

    fn evictions(&self) -> u64 {
        LruCache::evictions(self)
    }

    fn insertions(&self) -> u64 {
        LruCache::insertions(self)
    }

    fn avg_insertion_time(&self) -> Option<Duration> {
        LruCache::avg_insertion_time(self)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn snapshot_store(&self) -> HashMap<K, Arc<V>> {
        LruCache::snapshot_store(self)
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        LruCache::metrics_snapshot(self)
    }
}

impl<K, V> ConcurrentCache for LruCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_counts_hits_and_misses() {
        let cache = LruCache::new(4);
        cache.put(1, "one");
        assert_eq!(cache.get(&1).as_deref(), Some(&"one"));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.insertions(), 1);
    }

    #[test]
    fn lru_avg_insertion_time_undefined_before_put() {
        let cache: LruCache<u32, u32> = LruCache::new(4);
        assert_eq!(cache.avg_insertion_time(), None);
        cache.put(1, 1);
        assert!(cache.avg_insertion_time().is_some());
    }

    #[test]
    fn lru_remove_is_not_an_eviction() {
        let cache = LruCache::new(4);
        cache.put("a", 1);
        assert_eq!(cache.remove(&"a").as_deref(), Some(&1));
        cache.run_pending_tasks();
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.evictions(), 0);
    }

    #[test]
    fn lru_counters_saturate() {
        let cache = LruCache::new(4);
        cache.stats.hits.store(u64::MAX, Ordering::Relaxed);
        cache.stats.misses.store(u64::MAX, Ordering::Relaxed);
        cache.stats.insertions.store(u64::MAX, Ordering::Relaxed);
        cache.stats.insertion_nanos.store(u64::MAX, Ordering::Relaxed);

        cache.put(1, 1);
        cache.get(&1);
        cache.get(&2);

        assert_eq!(cache.hits(), u64::MAX);
        assert_eq!(cache.misses(), u64::MAX);
        assert_eq!(cache.insertions(), u64::MAX);
        assert_eq!(
            cache.metrics_snapshot().insertion_time_total,
            Duration::from_nanos(u64::MAX)
        );
    }

    #[test]
    fn lru_reset_metrics() {
        let cache = LruCache::new(4);
        cache.put(1, 1);
        cache.get(&1);
        cache.reset_metrics();
        assert_eq!(cache.metrics_snapshot().hits, 0);
        assert_eq!(cache.insertions(), 0);
        assert!(cache.contains(&1));
    }

    #[test]
    fn lru_debug_and_accessors() {
        let cache: LruCache<u8, u8> =
            LruCache::with_idle_timeout(8, Some(Duration::from_secs(30)));
        assert_eq!(cache.capacity(), 8);
        assert_eq!(cache.idle_timeout(), Some(Duration::from_secs(30)));
        assert!(cache.is_empty());
        assert!(format!("{cache:?}").contains("capacity: 8"));
    }

    #[test]
    fn lru_is_concurrent() {
        fn assert_concurrent<T: ConcurrentCache>() {}
        assert_concurrent::<LruCache<u64, String>>();
    }
}
