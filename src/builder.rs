//! Cache configuration and construction.
//!
//! [`CacheConfig`] holds the parameters, [`CacheBuilder`] sets them fluently,
//! validates them and builds either the LFU cache or, with the `lru` feature,
//! the LRU comparison backend.
//!
//! | Parameter      | Default              | Applies to | Validation        |
//! |----------------|----------------------|------------|-------------------|
//! | `capacity`     | [`DEFAULT_CAPACITY`] | LFU, LRU   | must be > 0       |
//! | `idle_timeout` | none                 | LRU only   | must be > 0 if set|
//!
//! ## Example
//!
//! ```rust
//! use lfukit::builder::CacheBuilder;
//!
//! let cache = CacheBuilder::new().capacity(100).build_lfu::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1).as_deref(), Some(&"hello".to_string()));
//! assert_eq!(cache.capacity(), 100);
//! ```

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;
use crate::policy::concurrent_lfu::ConcurrentLfuCache;
#[cfg(feature = "lru")]
use crate::policy::lru::LruCache;
use crate::traits::CacheService;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 100_000;

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Frequently Used, FIFO among equal frequencies.
    Lfu,
    /// Least Recently Used (moka backend).
    #[cfg(feature = "lru")]
    Lru,
}

/// Cache parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries. Fixed at construction.
    pub capacity: usize,
    /// Entries not read or written for this long are dropped. LRU only.
    pub idle_timeout: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            idle_timeout: None,
        }
    }
}

impl CacheConfig {
    /// Checks every parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if let Some(idle) = self.idle_timeout
            && idle.is_zero()
        {
            return Err(ConfigError::ZeroIdleTimeout(idle));
        }
        Ok(())
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Default)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Starts from [`CacheConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Sets the maximum number of entries.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Sets the maximum idle time for the LRU backend.
    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.config.idle_timeout = Some(idle_timeout);
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Builds the LFU cache, or reports why the configuration is invalid.
    ///
    /// LFU entries never expire, so a configured idle timeout is validated but
    /// otherwise ignored.
    ///
    /// ```rust
    /// use lfukit::builder::CacheBuilder;
    /// use lfukit::error::ConfigError;
    ///
    /// assert!(CacheBuilder::new().capacity(8).try_build_lfu::<u32, u32>().is_ok());
    /// assert_eq!(
    ///     CacheBuilder::new().capacity(0).try_build_lfu::<u32, u32>().unwrap_err(),
    ///     ConfigError::ZeroCapacity,
    /// );
    /// ```
    pub fn try_build_lfu<K, V>(&self) -> Result<ConcurrentLfuCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone + Debug,
    {
        self.config.validate()?;
        if self.config.idle_timeout.is_some() {
            tracing::warn!("idle timeout has no effect on the LFU cache");
        }
        Ok(ConcurrentLfuCache::new(self.config.capacity))
    }

    /// Builds the LFU cache.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. Use
    /// [`try_build_lfu`](Self::try_build_lfu) to handle the error instead.
    pub fn build_lfu<K, V>(&self) -> ConcurrentLfuCache<K, V>
    where
        K: Eq + Hash + Clone + Debug,
    {
        self.try_build_lfu()
            .unwrap_or_else(|err| panic!("invalid cache configuration: {err}"))
    }

    /// Builds the LRU backend, or reports why the configuration is invalid.
    #[cfg(feature = "lru")]
    pub fn try_build_lru<K, V>(&self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        self.config.validate()?;
        Ok(LruCache::with_idle_timeout(
            self.config.capacity,
            self.config.idle_timeout,
        ))
    }

    /// Builds the LRU backend.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    #[cfg(feature = "lru")]
    pub fn build_lru<K, V>(&self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        self.try_build_lru()
            .unwrap_or_else(|err| panic!("invalid cache configuration: {err}"))
    }

    /// Builds the cache for `policy` behind the shared service trait.
    ///
    /// ```rust
    /// use lfukit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let service = CacheBuilder::new()
    ///     .capacity(16)
    ///     .try_build::<u64, String>(CachePolicy::Lfu)
    ///     .unwrap();
    /// service.put(1, "one".to_string());
    /// assert_eq!(service.name(), "lfu");
    /// assert_eq!(service.len(), 1);
    /// ```
    pub fn try_build<K, V>(
        &self,
        policy: CachePolicy,
    ) -> Result<Arc<dyn CacheService<K, V> + Send + Sync>, ConfigError>
    where
        K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        let service: Arc<dyn CacheService<K, V> + Send + Sync> = match policy {
            CachePolicy::Lfu => Arc::new(self.try_build_lfu::<K, V>()?),
            #[cfg(feature = "lru")]
            CachePolicy::Lru => Arc::new(self.try_build_lru::<K, V>()?),
        };
        Ok(service)
    }
}
