use std::path::PathBuf;
use std::time::Duration;

use logqueue::BackpressurePolicy;
use logwriter_consumer::Mode;
use logwriter_destinations::DestinationKind;

/// Tuning parameters for [`create_writer`](crate::create_writer).
///
/// A `new` constructor with built-in defaults, a handful of named presets,
/// and `with_*` builders for the rest. The defaults below (`queue_size =
/// 10_000`, `batch_size = 100`, `flush_interval = 100ms`, `tick = 10ms`,
/// `policy = BLOCK`) match a conservative general-purpose writer.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub path: PathBuf,
    pub kind: DestinationKind,
    pub mode: Mode,
    /// `0` means unbounded.
    pub queue_size: usize,
    pub batch_size: usize,
    pub flush_interval: Duration,
    pub tick: Duration,
    pub policy: BackpressurePolicy,
}

impl WriterConfig {
    pub fn new(path: impl Into<PathBuf>, kind: DestinationKind, mode: Mode) -> Self {
        Self {
            path: path.into(),
            kind,
            mode,
            queue_size: 10_000,
            batch_size: 100,
            flush_interval: Duration::from_millis(100),
            tick: Duration::from_millis(10),
            policy: BackpressurePolicy::Block,
        }
    }

    /// LINE + TRIGGER, flushed as soon as a single line arrives: lowest
    /// per-line latency at the cost of one syscall per batch. Uses a 1ms
    /// flush interval rather than zero — the consumer clamps its internal
    /// wait to the same floor, so a literal zero buys nothing but a busier
    /// core while idle.
    pub fn low_latency(path: impl Into<PathBuf>) -> Self {
        Self::new(path, DestinationKind::Line, Mode::Trigger)
            .with_batch_size(1)
            .with_flush_interval(Duration::from_millis(1))
    }

    /// BLOCK + LOOP with large batches: highest throughput, bounded
    /// durability (up to one kernel buffer may be lost on power loss).
    pub fn high_throughput(path: impl Into<PathBuf>) -> Self {
        Self::new(path, DestinationKind::Block, Mode::Loop)
            .with_batch_size(1000)
            .with_flush_interval(Duration::from_millis(250))
    }

    /// LINE + TRIGGER with the non-blocking `BLOCK` overflow policy:
    /// strongest in-class durability, queue growth is unbounded under
    /// sustained producer pressure rather than dropping lines.
    pub fn durable(path: impl Into<PathBuf>) -> Self {
        Self::new(path, DestinationKind::Line, Mode::Trigger).with_policy(BackpressurePolicy::Block)
    }

    pub fn with_queue_size(mut self, queue_size: usize) -> Self {
        self.queue_size = queue_size;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        assert!(batch_size >= 1, "batch_size must be at least 1");
        self.batch_size = batch_size;
        self
    }

    pub fn with_flush_interval(mut self, flush_interval: Duration) -> Self {
        self.flush_interval = flush_interval;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_policy(mut self, policy: BackpressurePolicy) -> Self {
        self.policy = policy;
        self
    }
}
