use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use logqueue::{LogLine, Metrics, MetricsSnapshot, Queue, QueueError};
use logwriter_consumer::{Consumer, ConsumerConfig};
use logwriter_destinations::build as build_destination;

use crate::config::WriterConfig;
use crate::error::WriterError;
use crate::invariants::debug_assert_closed_once;

/// The composed facade: one queue, one consumer, one destination, one
/// metrics block.
///
/// Producers call [`Writer::send`] from any number of threads; exactly one
/// background thread (owned by the internal [`Consumer`]) ever touches the
/// destination. Dropping a `Writer` runs the same graceful-shutdown path as
/// an explicit `stop`/`close`, so shutdown happens on every exit path
/// including an unwinding panic.
pub struct Writer {
    queue: Arc<Queue>,
    consumer: Option<Consumer>,
    metrics: Arc<Metrics>,
    policy: logqueue::BackpressurePolicy,
    closed: AtomicBool,
}

impl Writer {
    /// Forwards `line` to the queue under the writer's configured
    /// backpressure policy. Returns `Ok(true)` if accepted, `Ok(false)` if
    /// dropped per policy, `Err(WriterError::Closed)` once `stop`/`close`
    /// has been called.
    pub fn send(&self, line: impl Into<LogLine>) -> Result<bool, WriterError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(WriterError::Closed);
        }
        // The atomic check above is the fast path; `Queue::put` enforces
        // the same rule against the narrow race where `stop()` lands
        // between that check and the lock below.
        match self.queue.put(line.into(), self.policy) {
            Ok(accepted) => Ok(accepted),
            Err(QueueError::Closed) => Err(WriterError::Closed),
        }
    }

    /// Wakes a MANUAL-mode consumer. No-op for TRIGGER/LOOP, and a no-op
    /// once the writer has been closed.
    pub fn trigger(&self) {
        if let Some(consumer) = &self.consumer {
            consumer.trigger();
        }
    }

    /// A consistent-enough snapshot of `{enqueued, written, dropped,
    /// errors, pending}`.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Initiates graceful shutdown: producers observe closure immediately
    /// (`send` starts returning `Err(Closed)`); the consumer finishes
    /// draining already-enqueued lines, flushes, and closes the
    /// destination exactly once.
    ///
    /// Idempotent: calling `stop` again after a successful shutdown is a
    /// no-op. Calling it again after a `ShutdownTimedOut` retries joining
    /// the still-running consumer rather than re-signaling it — the queue
    /// has already been told to stop.
    pub fn stop(&mut self, timeout: Option<Duration>) -> Result<(), WriterError> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.queue.stop();
        }

        let joined = match self.consumer.as_mut() {
            Some(consumer) => consumer.join(timeout),
            None => return Ok(()),
        };

        if !joined {
            return Err(WriterError::ShutdownTimedOut);
        }
        debug_assert_closed_once!(self.consumer.is_none());
        self.consumer = None;
        Ok(())
    }

    /// Alias for `stop(None)`: blocks until the consumer has drained,
    /// flushed, and closed the destination.
    pub fn close(&mut self) -> Result<(), WriterError> {
        self.stop(None)
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        let _ = self.stop(None);
    }
}

/// Constructs the fully-wired writer described by `config`: a queue, a
/// destination chosen from `config.kind`, and a consumer driving it in
/// `config.mode`.
pub fn create_writer(config: WriterConfig) -> Result<Writer, WriterError> {
    let metrics = Arc::new(Metrics::new());
    let queue = Arc::new(Queue::with_metrics(config.queue_size, Arc::clone(&metrics)));
    let destination = build_destination(config.kind, &config.path);

    let consumer_config = ConsumerConfig::new(config.mode)
        .with_batch_size(config.batch_size)
        .with_flush_interval(config.flush_interval)
        .with_tick(config.tick);

    let consumer = Consumer::spawn(Arc::clone(&queue), destination, Arc::clone(&metrics), consumer_config);

    Ok(Writer {
        queue,
        consumer: Some(consumer),
        metrics,
        policy: config.policy,
        closed: AtomicBool::new(false),
    })
}
