//! HashMap-backed value store.
//!
//! ## Architecture
//! - Keys map to `Arc<V>` in a `HashMap` for O(1) expected lookup.
//! - No capacity check: the owning policy evicts before inserting.
//! - Values are shared through `Arc`, so handing one out never copies `V`.
//!
//! ## Example Usage
//! ```rust
//! use std::sync::Arc;
//!
//! use lfukit::store::hashmap::HashMapStore;
//! use lfukit::store::traits::{StoreCore, StoreMut};
//!
//! let mut store: HashMapStore<u64, String> = HashMapStore::new();
//! store.insert(1, Arc::new("a".to_string()));
//! assert!(store.contains(&1));
//! assert_eq!(store.get(&1).map(|v| v.as_str()), Some("a"));
//! ```
//!
//! ## Type Constraints
//! - `K: Eq + Hash` for key lookup.
//! - `S: BuildHasher` for custom hashers (defaults to `RandomState`).
//!
//! ## Thread Safety
//! Single-threaded. The concurrent LFU cache guards it with its own lock.

use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use crate::store::traits::{StoreCore, StoreMut};

/// Single-threaded HashMap-backed store.
#[derive(Debug)]
pub struct HashMapStore<K, V, S = RandomState> {
    map: HashMap<K, Arc<V>, S>,
}

impl<K, V> HashMapStore<K, V, RandomState>
where
    K: Eq + Hash,
{
    /// Create an empty store with the default hasher.
    pub fn new() -> Self {
        Self::with_hasher(0, RandomState::new())
    }

    /// Create an empty store sized for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> HashMapStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Create a store sized for `capacity` entries with a custom hasher.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    /// Iterate over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Arc<V>)> {
        self.map.iter()
    }
}

impl<K, V> Default for HashMapStore<K, V, RandomState>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> StoreCore<K, V> for HashMapStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn get(&self, key: &K) -> Option<&Arc<V>> {
        self.map.get(key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<K, V, S> StoreMut<K, V> for HashMapStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.map.insert(key, value)
    }

    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        self.map.remove(key)
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}
