use std::fmt::Display;
use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// This exporter writes in the Prometheus text exposition format so it can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
///
/// ```
/// use lfukit::metrics::{CacheMetricsSnapshot, MetricsExporter, PrometheusTextExporter};
///
/// let exporter = PrometheusTextExporter::new("lfu", Vec::new());
/// exporter.export(&CacheMetricsSnapshot {
///     hits: 4,
///     ..CacheMetricsSnapshot::default()
/// });
///
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("lfu_hits_total 4"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: impl Display) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let written = writeln!(writer, "# TYPE {name} {kind}")
            .and_then(|()| writeln!(writer, "{name} {value}"));
        if let Err(err) = written {
            tracing::warn!(metric = %name, error = %err, "failed to write metric");
        }
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<CacheMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &CacheMetricsSnapshot) {
        self.write_metric("counter", "hits_total", snapshot.hits);
        self.write_metric("counter", "misses_total", snapshot.misses);
        self.write_metric("counter", "evictions_total", snapshot.evictions);
        self.write_metric("counter", "insertions_total", snapshot.insertions);
        self.write_metric(
            "counter",
            "insertion_seconds_total",
            snapshot.insertion_time_total.as_secs_f64(),
        );
        if let Some(avg) = snapshot.avg_insertion_time() {
            self.write_metric("gauge", "insertion_seconds_avg", avg.as_secs_f64());
        }
        self.write_metric("gauge", "len", snapshot.len);
        self.write_metric("gauge", "capacity", snapshot.capacity);
    }
}
