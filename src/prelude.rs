pub use crate::builder::{CacheBuilder, CacheConfig, CachePolicy, DEFAULT_CAPACITY};
pub use crate::ds::{FrequencyBuckets, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
pub use crate::policy::concurrent_lfu::ConcurrentLfuCache;
pub use crate::policy::lfu::LfuCache;
#[cfg(feature = "lru")]
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CacheService, ConcurrentCache};
