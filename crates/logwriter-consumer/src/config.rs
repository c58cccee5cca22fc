use std::time::Duration;

use crate::mode::Mode;

/// Tuning parameters for a [`Consumer`](crate::Consumer).
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    pub mode: Mode,
    /// Maximum lines per flush.
    pub batch_size: usize,
    /// Upper bound on the age of any buffered line before flush (TRIGGER),
    /// and the tick period (LOOP).
    pub flush_interval: Duration,
    /// Internal poll interval used by MANUAL mode to detect shutdown while
    /// waiting for `trigger()`.
    pub tick: Duration,
}

impl ConsumerConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            batch_size: 100,
            flush_interval: Duration::from_millis(100),
            tick: Duration::from_millis(50),
        }
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
}
