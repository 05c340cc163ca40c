//! Error types for the lfukit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by `check_invariants` when the store, the
//!   frequency tracker and the frequency buckets disagree. Normal cache
//!   operations never produce it; seeing one means a bug in this crate.
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity, zero idle timeout).
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::builder::CacheBuilder;
//! use lfukit::error::ConfigError;
//!
//! let err = CacheBuilder::new()
//!     .capacity(0)
//!     .try_build_lfu::<u64, String>()
//!     .unwrap_err();
//! assert_eq!(err, ConfigError::ZeroCapacity);
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::time::Duration;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`FrequencyBuckets::check_invariants`](crate::ds::FrequencyBuckets::check_invariants)
/// and [`LfuCache::check_invariants`](crate::policy::lfu::LfuCache::check_invariants).
/// Each variant names the invariant that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// The store and the frequency tracker hold different key sets.
    #[error("store holds {store} keys but frequency tracker holds {tracked}")]
    StoreTrackerMismatch { store: usize, tracked: usize },

    /// A key is stored without a frequency entry, or tracked without a value.
    #[error("key present in {present_in} but missing from {missing_from}")]
    OrphanKey {
        present_in: &'static str,
        missing_from: &'static str,
    },

    /// A bucket with no keys is still indexed.
    #[error("bucket for frequency {freq} is empty but still indexed")]
    EmptyBucket { freq: u64 },

    /// A key sits in a bucket that does not match its tracked frequency.
    #[error("key with frequency {tracked} found in bucket {bucket}")]
    MisplacedKey { tracked: u64, bucket: u64 },

    /// The number of linked keys disagrees with the number of tracked keys.
    #[error("buckets link {linked} keys but {tracked} keys are tracked")]
    LinkedCountMismatch { linked: usize, tracked: usize },

    /// Neighbouring bucket links are not symmetric or not ascending.
    #[error("bucket links around frequency {freq} are inconsistent")]
    BrokenBucketLinks { freq: u64 },

    /// Intrusive list pointers inside a bucket are inconsistent.
    #[error("list links inside bucket {freq} are inconsistent")]
    BrokenListLinks { freq: u64 },

    /// The cached minimum frequency is not the lowest indexed bucket.
    #[error("min frequency is {recorded:?} but lowest bucket is {actual:?}")]
    StaleMinFrequency {
        recorded: Option<u64>,
        actual: Option<u64>,
    },

    /// More entries are stored than the configured capacity allows.
    #[error("{len} entries exceed capacity {capacity}")]
    CapacityExceeded { len: usize, capacity: usize },
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`CacheBuilder::try_build_lfu`](crate::builder::CacheBuilder::try_build_lfu)
/// and the other fallible builder methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A cache must hold at least one entry.
    #[error("capacity must be greater than zero")]
    ZeroCapacity,

    /// An idle timeout of zero would expire every entry immediately.
    #[error("idle timeout must be greater than zero, got {0:?}")]
    ZeroIdleTimeout(Duration),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
