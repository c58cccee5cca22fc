use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::error::QueueError;
use crate::invariants::{debug_assert_capacity_respected, debug_assert_stop_terminal};
use crate::metrics::Metrics;
use crate::policy::BackpressurePolicy;

/// An already-serialized, opaque log line. The queue never inspects its
/// contents; the destination appends the trailing newline on write.
pub type LogLine = Vec<u8>;

enum Item {
    Line(LogLine),
    Stop,
}

struct Inner {
    items: VecDeque<Item>,
    /// Set the moment `stop()` is called, before the sentinel is ever read.
    /// Gates `put` immediately, independent of whether a reader has yet
    /// observed the sentinel (`stopped`, below).
    stop_requested: bool,
    /// Set once a reader (`get`/`drain`) pops the sentinel.
    stopped: bool,
}

/// Outcome of a [`Queue::get`] call.
#[derive(Debug)]
pub enum GetResult {
    /// A line was available.
    Line(LogLine),
    /// The stop sentinel was observed; the queue is now permanently stopped.
    Stopped,
    /// No line arrived before the timeout elapsed.
    TimedOut,
}

fn translate(item: Item, stopped: &mut bool) -> GetResult {
    match item {
        Item::Line(line) => GetResult::Line(line),
        Item::Stop => {
            let was_stopped = *stopped;
            *stopped = true;
            debug_assert_stop_terminal!(was_stopped, *stopped);
            GetResult::Stopped
        }
    }
}

/// A bounded, multi-producer / single-consumer FIFO with pluggable
/// backpressure policies.
///
/// Producer-side (`put`) is lock-protected rather than lock-free — see
/// `DESIGN.md` for why a classic mutex + condvar FIFO was chosen over a
/// per-producer lock-free ring for this shared-queue, drop-policy-bearing
/// design. The lock is held only long enough to push/evict one element; no
/// I/O happens under it.
pub struct Queue {
    inner: Mutex<Inner>,
    not_empty: Condvar,
    capacity: usize,
    metrics: Arc<Metrics>,
}

impl Queue {
    /// Creates a queue with its own fresh metrics block. `capacity == 0`
    /// means unbounded.
    pub fn new(capacity: usize) -> Self {
        Self::with_metrics(capacity, Arc::new(Metrics::new()))
    }

    /// Creates a queue sharing an externally-owned metrics block (used by
    /// the writer facade, which hands the same `Arc<Metrics>` to the
    /// consumer for `written`/`errors` accounting).
    pub fn with_metrics(capacity: usize, metrics: Arc<Metrics>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
                stop_requested: false,
                stopped: false,
            }),
            not_empty: Condvar::new(),
            capacity,
            metrics,
        }
    }

    /// The metrics block backing this queue's `enqueued`/`dropped` counters.
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Appends `line` per `policy`. Returns `Ok(true)` if accepted,
    /// `Ok(false)` if dropped per policy, or `Err(QueueError::Closed)` if
    /// `stop()` has already been called — producers that call `put` after
    /// shutdown has been requested get a synchronous "closed" signal rather
    /// than having their line silently orphaned past the stop sentinel.
    /// Never blocks on I/O; at most briefly contends the internal mutex.
    ///
    /// `enqueued` counts every accepted-for-consideration call, accepted or
    /// policy-dropped: the conservation law `written + dropped == enqueued`
    /// (and `pending >= 0`) only holds if a policy-rejected line is
    /// accounted for on both sides at once. A `Closed` rejection observed
    /// before `enqueued` is touched is never counted at all; one lost to a
    /// concurrent `stop()` after `enqueued` was already bumped is folded
    /// into `dropped` to keep the same law holding.
    pub fn put(&self, line: LogLine, policy: BackpressurePolicy) -> Result<bool, QueueError> {
        let mut guard = self.inner.lock().unwrap();
        if guard.stop_requested {
            return Err(QueueError::Closed);
        }
        drop(guard);
        self.metrics.record_enqueued();
        let mut guard = self.inner.lock().unwrap();
        if guard.stop_requested {
            // Lost the race with a concurrent `stop()` between the check
            // above and here. The enqueue was already counted; treat it as
            // a closed-rejection rather than silently orphaning the line
            // past the sentinel that just got appended.
            drop(guard);
            self.metrics.record_dropped();
            return Err(QueueError::Closed);
        }

        if self.capacity > 0 && guard.items.len() >= self.capacity {
            match policy {
                BackpressurePolicy::Block => {
                    // Append anyway: capacity is advisory under BLOCK to
                    // keep the producer path non-blocking.
                }
                BackpressurePolicy::DropNewest => {
                    drop(guard);
                    self.metrics.record_dropped();
                    return Ok(false);
                }
                BackpressurePolicy::DropOldest => {
                    if guard.items.pop_front().is_some() {
                        self.metrics.record_dropped();
                    }
                }
                BackpressurePolicy::Warn => {
                    eprintln!("logqueue: queue full, dropping message");
                    drop(guard);
                    self.metrics.record_dropped();
                    return Ok(false);
                }
            }
        }

        guard.items.push_back(Item::Line(line));
        debug_assert_capacity_respected!(guard.items.len(), self.capacity);
        drop(guard);
        self.not_empty.notify_one();
        Ok(true)
    }

    /// Consumer-side blocking read. `timeout = None` blocks indefinitely;
    /// `Some(d)` bounds the wait. Uses a recheck-after-wait pattern to
    /// avoid lost wakeups.
    pub fn get(&self, timeout: Option<Duration>) -> GetResult {
        let mut guard = self.inner.lock().unwrap();

        if let Some(item) = guard.items.pop_front() {
            return translate(item, &mut guard.stopped);
        }
        if guard.stopped {
            return GetResult::Stopped;
        }

        let deadline = timeout.map(|d| Instant::now() + d);
        loop {
            guard = match deadline {
                None => self.not_empty.wait(guard).unwrap(),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return GetResult::TimedOut;
                    }
                    let (g, _timed_out) =
                        self.not_empty.wait_timeout(guard, deadline - now).unwrap();
                    g
                }
            };

            if let Some(item) = guard.items.pop_front() {
                return translate(item, &mut guard.stopped);
            }
            if guard.stopped {
                return GetResult::Stopped;
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return GetResult::TimedOut;
                }
            }
        }
    }

    /// Non-blocking batch read of everything currently queued, stopping at
    /// (and consuming) the stop sentinel if present.
    pub fn drain(&self) -> Vec<LogLine> {
        let mut guard = self.inner.lock().unwrap();
        let mut out = Vec::with_capacity(guard.items.len());
        while let Some(item) = guard.items.pop_front() {
            match item {
                Item::Line(line) => out.push(line),
                Item::Stop => {
                    guard.stopped = true;
                    break;
                }
            }
        }
        out
    }

    /// Idempotent. Appends the stop sentinel and wakes the consumer.
    /// `put` starts rejecting with `QueueError::Closed` immediately, even
    /// before the sentinel has been read.
    pub fn stop(&self) {
        let mut guard = self.inner.lock().unwrap();
        guard.stop_requested = true;
        guard.items.push_back(Item::Stop);
        drop(guard);
        self.not_empty.notify_all();
    }

    /// Non-blocking check for any currently-queued item (sentinel included).
    pub fn has_data(&self) -> bool {
        !self.inner.lock().unwrap().items.is_empty()
    }

    /// Approximate length, including any unconsumed sentinel.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().items.len()
    }

    /// `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` once the sentinel has been observed by a reader.
    pub fn is_stopped(&self) -> bool {
        self.inner.lock().unwrap().stopped
    }
}
