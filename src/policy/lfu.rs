//! # LFU (Least Frequently Used) Cache Engine
//!
//! Single-threaded LFU engine. It keeps three views of the cached data in
//! lock-step and evicts the least frequently used entry in O(1):
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                                  │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  HashMapStore<K, V>          key → Arc<V>       (cache store)      │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  FrequencyBuckets<K>                                               │ │
//!   │   │    key  → node{freq}          (frequency tracker)                  │ │
//!   │   │    freq → FIFO list of keys   (frequency index)                    │ │
//!   │   │                                                                    │ │
//!   │   │    freq=1: [page_3, page_9]   ← page_3 is the next victim          │ │
//!   │   │    freq=3: [page_2]                                                │ │
//!   │   │    freq=15: [page_1]                                               │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   LfuMetrics: hits, misses, evictions, insertions, insertion time        │
//!   │   capacity: usize  (maximum entries)                                     │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Put Flow
//!
//! ```text
//!   put(key, value)
//!        │
//!        ▼
//!   ┌────────────────────────────────────────────────────────────────────────┐
//!   │ Key already cached?                                                    │
//!   │   YES → promote (freq + 1), overwrite value                            │
//!   │   NO  → capacity check                                                 │
//!   └────────────────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   ┌────────────────────────────────────────────────────────────────────────┐
//!   │ len == capacity?                                                       │
//!   │   YES → evict head of the lowest-frequency bucket, count an eviction   │
//!   │   NO  → continue                                                       │
//!   └────────────────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   insert with freq = 1 at the tail of bucket 1, store value
//!   record insertion (count + elapsed wall-clock time)
//! ```
//!
//! ## Tie-breaking
//!
//! Among the keys at the lowest frequency, the one that has sat in that bucket
//! the longest is evicted first. A promotion moves a key to the *tail* of its
//! new bucket, so a key that just reached frequency `n` is the last of the
//! frequency-`n` keys to go.
//!
//! ```text
//!   put A, put B, put C          freq=1: [A, B, C]
//!   get C, get A                 freq=1: [B]      freq=2: [C, A]
//!   evict → B, evict → C, evict → A
//! ```
//!
//! ## Core Operations
//!
//! | Method             | Complexity | Description                              |
//! |--------------------|------------|------------------------------------------|
//! | `new(capacity)`    | O(1)       | Create cache with given capacity         |
//! | `put(k, v)`        | O(1)*      | Insert/overwrite, may evict one entry    |
//! | `get(&k)`          | O(1)       | Get value, increments frequency          |
//! | `remove(&k)`       | O(1)       | Explicit delete, not an eviction         |
//! | `evict_one()`      | O(1)       | Evict the LFU entry, counted             |
//! | `peek_lfu()`       | O(1)       | Next victim, no state change             |
//! | `snapshot_*()`     | O(n)       | Owned copies of the three views          |
//! | `check_invariants` | O(n)       | Cross-view consistency audit             |
//!
//! `*` amortized: hash map growth.
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//!
//! // "b" has the lowest frequency
//! assert_eq!(cache.put("c", 3), Some("b"));
//! assert_eq!(cache.frequency(&"a"), Some(2));
//! assert_eq!(cache.evictions(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! `LfuCache` is not synchronized. Use
//! [`ConcurrentLfuCache`](crate::policy::concurrent_lfu::ConcurrentLfuCache)
//! to share one between threads.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::ds::FrequencyBuckets;
use crate::error::InvariantError;
use crate::metrics::metrics_impl::LfuMetrics;
use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::store::hashmap::HashMapStore;
use crate::store::traits::{StoreCore, StoreMut};

/// Most entries reserved up front by [`LfuCache::new`]. Larger caches grow
/// their maps on demand.
pub const PREALLOC_LIMIT: usize = 1 << 16;

/// Single-threaded O(1) LFU cache with FIFO tie-breaking.
#[derive(Debug)]
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    store: HashMapStore<K, V>,
    freq: FrequencyBuckets<K>,
    capacity: usize,
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is accepted: every new key is dropped on `put`.
    /// [`CacheBuilder`](crate::builder::CacheBuilder) rejects it instead.
    pub fn new(capacity: usize) -> Self {
        let reserve = capacity.min(PREALLOC_LIMIT);
        Self {
            store: HashMapStore::with_capacity(reserve),
            freq: FrequencyBuckets::with_capacity(reserve),
            capacity,
            metrics: LfuMetrics::default(),
        }
    }

    /// Looks up `key`, counting a hit or a miss.
    ///
    /// A hit promotes the key one frequency up. The value is returned
    /// unchanged.
    pub fn get(&mut self, key: &K) -> Option<Arc<V>> {
        let Some(value) = self.store.get(key).cloned() else {
            self.metrics.record_get_miss();
            return None;
        };
        self.freq.promote(key);
        self.metrics.record_get_hit();
        Some(value)
    }

    /// Inserts or overwrites `key` and returns the key evicted to make room,
    /// if any.
    ///
    /// Overwriting promotes the key instead of resetting its frequency. Every
    /// call is counted as one insertion and timed, including calls that drop
    /// the key because the capacity is zero.
    pub fn put(&mut self, key: K, value: V) -> Option<K> {
        let started = Instant::now();
        let evicted = self.put_untimed(key, Arc::new(value));
        self.metrics.record_insertion(started.elapsed());
        evicted
    }

    fn put_untimed(&mut self, key: K, value: Arc<V>) -> Option<K> {
        if self.store.contains(&key) {
            self.freq.promote(&key);
            self.store.insert(key, value);
            return None;
        }

        if self.capacity == 0 {
            return None;
        }

        let evicted = if self.store.len() >= self.capacity {
            self.evict_one().map(|(victim, _)| victim)
        } else {
            None
        };

        self.freq.insert(key.clone());
        self.store.insert(key, value);
        evicted
    }

    /// Evicts the least frequently used entry and counts it as an eviction.
    ///
    /// Returns `None` on an empty cache.
    pub fn evict_one(&mut self) -> Option<(K, Arc<V>)> {
        let entry = self.take_lfu()?;
        self.metrics.record_eviction();
        Some(entry)
    }

    /// Removes the least frequently used entry without counting an eviction.
    pub fn pop_lfu(&mut self) -> Option<(K, Arc<V>)> {
        self.take_lfu()
    }

    fn take_lfu(&mut self) -> Option<(K, Arc<V>)> {
        let (key, _) = self.freq.pop_min()?;
        let value = self.store.remove(&key)?;
        Some((key, value))
    }

    /// Returns the entry `evict_one` would remove next, with its frequency.
    pub fn peek_lfu(&self) -> Option<(&K, &Arc<V>, u64)> {
        let (key, freq) = self.freq.peek_min()?;
        let value = self.store.get(key)?;
        Some((key, value, freq))
    }

    /// Deletes `key`. Not counted as an eviction.
    pub fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        self.freq.remove(key)?;
        self.store.remove(key)
    }

    /// Current frequency of `key`, without touching it.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.freq.frequency(key)
    }

    /// Checks presence without counting a hit or promoting.
    pub fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry. Metrics are kept.
    pub fn clear(&mut self) {
        self.store.clear();
        self.freq.clear();
    }

    pub fn hits(&self) -> u64 {
        self.metrics.hits
    }

    pub fn misses(&self) -> u64 {
        self.metrics.misses
    }

    pub fn evictions(&self) -> u64 {
        self.metrics.evictions
    }

    pub fn insertions(&self) -> u64 {
        self.metrics.insertions
    }

    /// Mean wall-clock time per `put`, `None` before the first one.
    pub fn avg_insertion_time(&self) -> Option<Duration> {
        self.metrics.avg_insertion_time()
    }

    pub fn metrics(&self) -> &LfuMetrics {
        &self.metrics
    }

    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Owned copy of the key → value view.
    pub fn snapshot_store(&self) -> HashMap<K, Arc<V>> {
        self.store
            .iter()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
            .collect()
    }

    /// Owned copy of the key → frequency view.
    pub fn snapshot_frequencies(&self) -> HashMap<K, u64> {
        self.freq
            .iter()
            .map(|(key, freq)| (key.clone(), freq))
            .collect()
    }

    /// Owned copy of the frequency → keys view. Keys are listed oldest first,
    /// so the first key of the first bucket is the next eviction victim.
    pub fn snapshot_buckets(&self) -> BTreeMap<u64, Vec<K>> {
        self.freq
            .iter_buckets()
            .map(|(freq, keys)| (freq, keys.cloned().collect()))
            .collect()
    }

    /// Audits that the store, the tracker and the buckets agree, and that the
    /// capacity bound holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.freq.check_invariants()?;

        if self.store.len() != self.freq.len() {
            return Err(InvariantError::StoreTrackerMismatch {
                store: self.store.len(),
                tracked: self.freq.len(),
            });
        }
        if self.store.iter().any(|(key, _)| !self.freq.contains(key)) {
            return Err(InvariantError::OrphanKey {
                present_in: "store",
                missing_from: "frequency tracker",
            });
        }
        if self.store.len() > self.capacity {
            return Err(InvariantError::CapacityExceeded {
                len: self.store.len(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Get(u8),
        Put(u8, u16),
        Remove(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..24).prop_map(Op::Get),
            ((0u8..24), any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
            (0u8..24).prop_map(Op::Remove),
        ]
    }

    proptest! {
        /// Property: invariants hold and len never exceeds capacity
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_invariants_after_every_op(
            capacity in 0usize..8,
            ops in prop::collection::vec(op(), 0..200)
        ) {
            let mut cache = LfuCache::new(capacity);
            for op in ops {
                match op {
                    Op::Get(k) => { cache.get(&k); }
                    Op::Put(k, v) => { cache.put(k, v); }
                    Op::Remove(k) => { cache.remove(&k); }
                }
                prop_assert_eq!(cache.check_invariants(), Ok(()));
                prop_assert!(cache.len() <= capacity);
            }
        }

        /// Property: a successful get raises the frequency by exactly one
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_hit_increments_frequency(
            ops in prop::collection::vec(op(), 0..100),
            probe in 0u8..24
        ) {
            let mut cache = LfuCache::new(6);
            for op in ops {
                match op {
                    Op::Get(k) => { cache.get(&k); }
                    Op::Put(k, v) => { cache.put(k, v); }
                    Op::Remove(k) => { cache.remove(&k); }
                }
            }
            let before = cache.frequency(&probe);
            let hit = cache.get(&probe).is_some();
            prop_assert_eq!(hit, before.is_some());
            prop_assert_eq!(cache.frequency(&probe), before.map(|f| f + 1));
        }

        /// Property: the evicted key had the minimum frequency
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_victim_has_minimum_frequency(
            ops in prop::collection::vec(op(), 0..200)
        ) {
            let mut cache = LfuCache::new(4);
            for op in ops {
                if let Op::Put(k, v) = op {
                    let before = cache.snapshot_frequencies();
                    let expected_victim = cache.snapshot_buckets()
                        .into_iter()
                        .next()
                        .and_then(|(_, keys)| keys.into_iter().next());
                    let evicted = cache.put(k, v);
                    if let Some(victim) = evicted {
                        let min = before.values().copied().min();
                        prop_assert_eq!(before.get(&victim).copied(), min);
                        prop_assert_eq!(Some(victim), expected_victim);
                        prop_assert!(!cache.contains(&victim));
                    }
                } else if let Op::Get(k) = op {
                    cache.get(&k);
                }
            }
        }
    }
}
