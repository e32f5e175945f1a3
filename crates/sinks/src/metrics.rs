//! Sink metrics
//!
//! Atomic counters shared between a sink and whoever reports on it. A
//! sink is moved into a shared receiver on registration, so callers keep
//! an `Arc<SinkMetrics>` handle instead.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one sink
#[derive(Debug, Default)]
pub struct SinkMetrics {
    blocks_written: AtomicU64,
    blocks_dropped: AtomicU64,
    bytes_written: AtomicU64,
}

/// Point-in-time copy of [`SinkMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub blocks_written: u64,
    /// Blocks discarded for carrying an empty label
    pub blocks_dropped: u64,
    pub bytes_written: u64,
}

impl SinkMetrics {
    pub const fn new() -> Self {
        Self {
            blocks_written: AtomicU64::new(0),
            blocks_dropped: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_written(&self, bytes: u64) {
        self.blocks_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped(&self) {
        self.blocks_dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn blocks_written(&self) -> u64 {
        self.blocks_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn blocks_dropped(&self) -> u64 {
        self.blocks_dropped.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            blocks_written: self.blocks_written.load(Ordering::Relaxed),
            blocks_dropped: self.blocks_dropped.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        assert_eq!(SinkMetrics::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_metrics_record() {
        let metrics = SinkMetrics::new();
        metrics.record_written(18);
        metrics.record_written(20);
        metrics.record_dropped();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.blocks_written, 2);
        assert_eq!(snapshot.blocks_dropped, 1);
        assert_eq!(snapshot.bytes_written, 38);
        assert_eq!(metrics.blocks_written(), 2);
        assert_eq!(metrics.blocks_dropped(), 1);
    }
}
