//! Writer metrics: concurrent counters plus a point-in-time snapshot.
//!
//! Split into an [`AtomicU64`]-backed type for the hot path shared across
//! producer and consumer threads, and a plain-`u64` snapshot type for
//! reporting.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::invariants::debug_assert_pending_non_negative;

/// Concurrently-updated counters backing a [`Queue`](crate::Queue).
///
/// `enqueued` and `dropped` are incremented from any producer thread;
/// `written`, `errors`, and `flush_count` are incremented only by the
/// consumer. All increments use `Relaxed` ordering — callers only need
/// eventual consistency between counters, not a total order across them.
#[derive(Debug, Default)]
pub struct Metrics {
    enqueued: AtomicU64,
    written: AtomicU64,
    dropped: AtomicU64,
    errors: AtomicU64,
    flush_count: AtomicU64,
}

impl Metrics {
    /// Creates a fresh, zeroed metrics block.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_enqueued(&self) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// Records `count` lines as handed off to the destination successfully,
    /// and counts the flush itself. Called by the consumer after a
    /// successful `write_batch`.
    pub fn record_written(&self, count: u64) {
        self.written.fetch_add(count, Ordering::Relaxed);
        self.flush_count.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records `count` lines as dropped. Called by the consumer when a
    /// batch fails to reach the destination: every accepted line ends up
    /// in `written` or `dropped`.
    pub fn record_dropped_many(&self, count: u64) {
        self.dropped.fetch_add(count, Ordering::Relaxed);
    }

    /// Records one destination-level write failure.
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of lines submitted via `put` so far, accepted or not — the
    /// left-hand side of the `written + dropped == enqueued` conservation
    /// law.
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Number of lines the consumer has handed to the destination.
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    /// Number of lines rejected by a backpressure policy.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Number of destination-level write failures recorded.
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Number of successful `write_batch` calls the consumer has made.
    pub fn flush_count(&self) -> u64 {
        self.flush_count.load(Ordering::Relaxed)
    }

    /// `enqueued - written - dropped`, i.e. lines accepted but not yet
    /// accounted for at the destination.
    pub fn pending(&self) -> i64 {
        let pending = self.enqueued() as i64 - self.written() as i64 - self.dropped() as i64;
        debug_assert_pending_non_negative!(pending);
        pending
    }

    /// Takes a consistent-enough point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            enqueued: self.enqueued(),
            written: self.written(),
            dropped: self.dropped(),
            errors: self.errors(),
            pending: self.pending(),
            flush_count: self.flush_count(),
        }
    }
}

/// Plain-`u64` copy of [`Metrics`] at one instant, safe to move around and
/// compare without further synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub enqueued: u64,
    pub written: u64,
    pub dropped: u64,
    pub errors: u64,
    pub pending: i64,
    pub flush_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_count_tracks_successful_writes_only() {
        let m = Metrics::new();
        m.record_written(10);
        m.record_written(5);
        m.record_dropped_many(3); // a failed batch: no flush_count bump

        let snapshot = m.snapshot();
        assert_eq!(snapshot.written, 15);
        assert_eq!(snapshot.flush_count, 2);
        assert_eq!(snapshot.dropped, 3);
    }

    #[test]
    fn pending_reflects_conservation_law() {
        let m = Metrics::new();
        for _ in 0..10 {
            m.record_enqueued();
        }
        m.record_written(6);
        m.record_dropped_many(2);

        assert_eq!(m.pending(), 2);
    }
}
