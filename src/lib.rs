//! lfukit: a thread-safe O(1) LFU cache with FIFO tie-breaking.
//!
//! The cache keeps three views of its contents in lock-step: key → value,
//! key → access frequency, and frequency → keys in arrival order. Eviction
//! removes the entry with the lowest frequency, oldest first among equals.
//!
//! ## Modules
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | `ds`      | Slot arena and frequency buckets                            |
//! | `store`   | Key → value storage                                         |
//! | `policy`  | `LfuCache`, `ConcurrentLfuCache`, `LruCache` (feature `lru`) |
//! | `metrics` | Counters, snapshots, Prometheus text export                 |
//! | `builder` | `CacheBuilder`, `CacheConfig`                               |
//! | `traits`  | `CacheService`, `ConcurrentCache`                           |
//! | `error`   | `ConfigError`, `InvariantError`                             |
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use lfukit::prelude::*;
//!
//! let cache: Arc<ConcurrentLfuCache<u64, String>> =
//!     Arc::new(CacheBuilder::new().capacity(2).build_lfu());
//!
//! let writer = Arc::clone(&cache);
//! thread::spawn(move || {
//!     writer.put(1, "one".to_string());
//!     writer.put(2, "two".to_string());
//! })
//! .join()
//! .unwrap();
//!
//! cache.get(&1);
//! cache.put(3, "three".to_string()); // evicts 2, the least frequently used
//!
//! assert!(!cache.contains(&2));
//! assert_eq!(cache.evictions(), 1);
//! assert!(cache.check_invariants().is_ok());
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod store;
pub mod traits;
