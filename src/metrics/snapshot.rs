use std::time::Duration;

use crate::metrics::metrics_impl::average;

/// Point-in-time copy of a cache's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Number of `put` calls, including overwrites and dropped keys.
    pub insertions: u64,
    pub insertion_time_total: Duration,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    /// Total `get` calls.
    pub fn gets(&self) -> u64 {
        self.hits.saturating_add(self.misses)
    }

    /// Fraction of `get` calls that hit, `None` before the first `get`.
    pub fn hit_rate(&self) -> Option<f64> {
        let gets = self.gets();
        (gets != 0).then(|| self.hits as f64 / gets as f64)
    }

    /// Mean wall-clock time per `put`, `None` before the first one.
    pub fn avg_insertion_time(&self) -> Option<Duration> {
        average(self.insertion_time_total, self.insertions)
    }
}
