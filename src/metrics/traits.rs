//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so cache
//! logic only ever writes counters, while benches, tests and monitoring read
//! them through their own seams.
//!
//! ## Architecture
//!
//! ```text
//!            ┌─────────────────────────────┐
//!            │     CoreMetricsRecorder     │
//!            │  get_hit/get_miss/insertion │
//!            │  eviction                   │
//!            └──────────────┬──────────────┘
//!                           │
//!                           ▼
//!                    ┌────────────┐
//!                    │ LfuMetrics │  (held under the cache lock)
//!                    └────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! ## Design Goals
//! - **Single responsibility**: recorders only write counters; providers only
//!   read/snapshot; exporters only publish to monitoring systems.
//! - **Environment split**:
//!   - Production: recorder + exporter.
//!   - Bench/Test: snapshot provider + [`MetricsReset`].

use std::time::Duration;

/// Counters every cache records.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    /// One `put` call and the wall-clock time it took.
    fn record_insertion(&mut self, elapsed: Duration);
    fn record_eviction(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
