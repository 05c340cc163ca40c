//! Storage backends for cache policies.
//!
//! Stores own key/value pairs and answer lookups. Policies decide what to keep
//! and when to evict. A store never enforces capacity on its own: the policy
//! evicts before it inserts a new key, so the two cannot disagree about what
//! "full" means.

use std::sync::Arc;

/// Read-only store operations.
pub trait StoreCore<K, V> {
    /// Fetch a value by key.
    fn get(&self, key: &K) -> Option<&Arc<V>>;

    /// Check if a key exists.
    fn contains(&self, key: &K) -> bool;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Check if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mutable store operations for single-threaded backends.
pub trait StoreMut<K, V>: StoreCore<K, V> {
    /// Insert or overwrite a value. Returns the previous value if present.
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>>;

    /// Remove a value by key.
    fn remove(&mut self, key: &K) -> Option<Arc<V>>;

    /// Remove all entries.
    fn clear(&mut self);
}
