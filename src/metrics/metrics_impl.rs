use std::time::Duration;

use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::CoreMetricsRecorder;

/// LFU counters. All counters saturate instead of wrapping.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LfuMetrics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub insertions: u64,
    pub insertion_time_total: Duration,
}

impl LfuMetrics {
    /// Copies the counters into a snapshot along with the current gauges.
    pub fn snapshot(&self, len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            insertions: self.insertions,
            insertion_time_total: self.insertion_time_total,
            len,
            capacity,
        }
    }

    /// Mean wall-clock time per `put`, `None` before the first one.
    pub fn avg_insertion_time(&self) -> Option<Duration> {
        average(self.insertion_time_total, self.insertions)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CoreMetricsRecorder for LfuMetrics {
    fn record_get_hit(&mut self) {
        self.hits = self.hits.saturating_add(1);
    }

    fn record_get_miss(&mut self) {
        self.misses = self.misses.saturating_add(1);
    }

    fn record_insertion(&mut self, elapsed: Duration) {
        self.insertions = self.insertions.saturating_add(1);
        self.insertion_time_total = self.insertion_time_total.saturating_add(elapsed);
    }

    fn record_eviction(&mut self) {
        self.evictions = self.evictions.saturating_add(1);
    }
}

/// `total / count`, `None` when `count` is zero.
pub(crate) fn average(total: Duration, count: u64) -> Option<Duration> {
    if count == 0 {
        return None;
    }
    let nanos = total.as_nanos() / u128::from(count);
    Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
}
