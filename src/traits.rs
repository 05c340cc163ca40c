//! # Cache Service Traits
//!
//! The seam shared by every thread-safe cache in this crate. Benchmarks and
//! cross-policy tests are written against [`CacheService`] once and run against
//! both the LFU cache and the LRU comparison backend.
//!
//! ## Architecture
//!
//! ```text
//!                   ┌─────────────────────────────────────────┐
//!                   │          CacheService<K, V>             │
//!                   │                                         │
//!                   │  get(&, &K) → Option<Arc<V>>            │
//!                   │  put(&, K, V)                           │
//!                   │  hits / misses / evictions / insertions │
//!                   │  avg_insertion_time → Option<Duration>  │
//!                   │  len / capacity                         │
//!                   │  snapshot_store → HashMap<K, Arc<V>>    │
//!                   │  metrics_snapshot                       │
//!                   └──────────────────┬──────────────────────┘
//!                                      │
//!                ┌─────────────────────┴─────────────────────┐
//!                ▼                                           ▼
//!   ┌────────────────────────────┐              ┌────────────────────────────┐
//!   │  ConcurrentLfuCache<K, V>  │              │     LruCache<K, V>         │
//!   │  (mutex-guarded LFU)       │              │  (moka, feature "lru")     │
//!   └────────────────────────────┘              └────────────────────────────┘
//! ```
//!
//! All methods take `&self`: implementations synchronize internally, so a
//! service is shared between threads through an `Arc`.
//!
//! ## Trait Summary
//!
//! | Trait             | Extends       | Purpose                               |
//! |-------------------|---------------|---------------------------------------|
//! | `CacheService`    | -             | Uniform get/put + metrics surface     |
//! | `ConcurrentCache` | `Send + Sync` | Marker for thread-safe caches         |

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::metrics::snapshot::CacheMetricsSnapshot;

/// Uniform surface over the thread-safe caches.
///
/// # Example
///
/// ```
/// use lfukit::policy::concurrent_lfu::ConcurrentLfuCache;
/// use lfukit::traits::CacheService;
///
/// fn warm<S: CacheService<u32, String>>(service: &S) {
///     for i in 0..3 {
///         service.put(i, i.to_string());
///     }
///     service.get(&0);
/// }
///
/// let cache = ConcurrentLfuCache::new(8);
/// warm(&cache);
/// assert_eq!(CacheService::hits(&cache), 1);
/// assert_eq!(CacheService::len(&cache), 3);
/// ```
pub trait CacheService<K, V> {
    /// Short policy name used in reports.
    fn name(&self) -> &'static str;

    /// Looks up `key`, counting a hit or a miss.
    fn get(&self, key: &K) -> Option<Arc<V>>;

    /// Inserts or overwrites `key`, evicting if the cache is full.
    fn put(&self, key: K, value: V);

    fn hits(&self) -> u64;

    fn misses(&self) -> u64;

    fn evictions(&self) -> u64;

    fn insertions(&self) -> u64;

    /// Mean wall-clock time per `put`, `None` before the first one.
    fn avg_insertion_time(&self) -> Option<Duration>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    /// Owned copy of the cached entries.
    fn snapshot_store(&self) -> HashMap<K, Arc<V>>;

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot;
}

/// Marker trait for caches that are safe to use concurrently.
///
/// # Example
///
/// ```
/// use lfukit::traits::{CacheService, ConcurrentCache};
///
/// fn share<C>(cache: std::sync::Arc<C>)
/// where
///     C: CacheService<u64, String> + ConcurrentCache + 'static,
/// {
///     std::thread::spawn(move || cache.put(1, "value".to_string()))
///         .join()
///         .unwrap();
/// }
///
/// share(std::sync::Arc::new(lfukit::policy::concurrent_lfu::ConcurrentLfuCache::new(4)));
/// ```
pub trait ConcurrentCache: Send + Sync {}
