use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use logqueue::{GetResult, LogLine, Metrics, Queue};
use logwriter_destinations::Destination;

use crate::config::ConsumerConfig;
use crate::invariants::debug_assert_batch_non_empty;
use crate::mode::Mode;
use crate::signal::Signal;
use crate::state::{ConsumerState, StateCell};

/// Floor under any internal wait derived from `flush_interval`/tick
/// configuration. A `flush_interval` of zero is a legitimate "flush as
/// soon as possible" configuration (see `WriterConfig::low_latency`), not
/// a license to busy-spin a full core checking an empty queue — every
/// blocking wait in this module is clamped to at least this long.
const MIN_WAIT: Duration = Duration::from_millis(1);

fn flush_batch(destination: &mut dyn Destination, metrics: &Metrics, batch: &mut Vec<LogLine>) {
    if batch.is_empty() {
        return;
    }
    debug_assert_batch_non_empty!(batch);
    match destination.write_batch(batch) {
        Ok(()) => metrics.record_written(batch.len() as u64),
        Err(err) => {
            metrics.record_error();
            metrics.record_dropped_many(batch.len() as u64);
            eprintln!("logwriter: destination '{}' write failed: {err}", destination.name());
        }
    }
    batch.clear();
}

fn run_trigger(
    queue: &Queue,
    destination: &mut dyn Destination,
    metrics: &Metrics,
    config: &ConsumerConfig,
    state: &StateCell,
) {
    let mut batch = Vec::new();
    let mut last_flush = Instant::now();

    loop {
        match queue.get(Some(config.flush_interval.max(MIN_WAIT))) {
            GetResult::TimedOut => {
                if !batch.is_empty() {
                    flush_batch(destination, metrics, &mut batch);
                    last_flush = Instant::now();
                }
            }
            GetResult::Stopped => {
                state.set(ConsumerState::Draining);
                flush_batch(destination, metrics, &mut batch);
                break;
            }
            GetResult::Line(line) => {
                batch.push(line);
                batch.extend(queue.drain());
                let elapsed = last_flush.elapsed();
                if batch.len() >= config.batch_size || elapsed >= config.flush_interval {
                    flush_batch(destination, metrics, &mut batch);
                    last_flush = Instant::now();
                }
            }
        }
    }
}

fn run_loop(
    queue: &Queue,
    destination: &mut dyn Destination,
    metrics: &Metrics,
    config: &ConsumerConfig,
    state: &StateCell,
) {
    let mut batch = Vec::new();
    let mut last_flush = Instant::now();

    loop {
        if !queue.has_data() {
            // Bounds the tick even when flush_interval == 0, so an idle
            // LOOP consumer never busy-spins and starves producers of CPU.
            thread::sleep(MIN_WAIT);
        }

        batch.extend(queue.drain());

        if queue.is_stopped() {
            state.set(ConsumerState::Draining);
            flush_batch(destination, metrics, &mut batch);
            break;
        }

        let elapsed = last_flush.elapsed();
        if !batch.is_empty() && (batch.len() >= config.batch_size || elapsed >= config.flush_interval) {
            flush_batch(destination, metrics, &mut batch);
            last_flush = Instant::now();
        }
    }
}

fn run_manual(
    queue: &Queue,
    destination: &mut dyn Destination,
    metrics: &Metrics,
    config: &ConsumerConfig,
    state: &StateCell,
    signal: &Signal,
) {
    loop {
        if !signal.wait_timeout(config.tick) {
            if queue.is_stopped() {
                state.set(ConsumerState::Draining);
                let mut remaining = queue.drain();
                flush_batch(destination, metrics, &mut remaining);
                break;
            }
            continue;
        }

        let mut batch = queue.drain();
        let stopped = queue.is_stopped();
        if !batch.is_empty() {
            flush_batch(destination, metrics, &mut batch);
        }
        signal.clear();

        if stopped {
            state.set(ConsumerState::Draining);
            break;
        }
    }
}

/// The single background execution context driving a destination.
///
/// Runs on a dedicated `std::thread` for the writer's lifetime — destination
/// I/O (`std::fs`, raw `mmap`) is always blocking, so a thread rather than
/// an async task keeps the ambient stack free of a runtime dependency (see
/// `DESIGN.md`).
pub struct Consumer {
    mode: Mode,
    state: Arc<StateCell>,
    manual_signal: Arc<Signal>,
    handle: Option<JoinHandle<()>>,
}

impl Consumer {
    /// Spawns the consumer thread. `destination` is moved onto the thread
    /// and is never touched from any other context thereafter.
    pub fn spawn(
        queue: Arc<Queue>,
        mut destination: Box<dyn Destination>,
        metrics: Arc<Metrics>,
        config: ConsumerConfig,
    ) -> Self {
        let state = Arc::new(StateCell::new(ConsumerState::Initializing));
        let manual_signal = Arc::new(Signal::new());
        let mode = config.mode;

        let thread_state = Arc::clone(&state);
        let thread_signal = Arc::clone(&manual_signal);

        let handle = thread::Builder::new()
            .name("logwriter-consumer".to_string())
            .spawn(move || {
                thread_state.set(ConsumerState::Running);

                let result = std::panic::catch_unwind(AssertUnwindSafe(|| match config.mode {
                    Mode::Trigger => {
                        run_trigger(&queue, &mut *destination, &metrics, &config, &thread_state)
                    }
                    Mode::Loop => {
                        run_loop(&queue, &mut *destination, &metrics, &config, &thread_state)
                    }
                    Mode::Manual => run_manual(
                        &queue,
                        &mut *destination,
                        &metrics,
                        &config,
                        &thread_state,
                        &thread_signal,
                    ),
                }));

                if result.is_err() {
                    metrics.record_error();
                    eprintln!("logwriter: consumer thread panicked, closing destination");
                }
                if let Err(err) = destination.close() {
                    metrics.record_error();
                    eprintln!("logwriter: error closing destination: {err}");
                }
                thread_state.set(ConsumerState::Closed);
            })
            .expect("failed to spawn logwriter consumer thread");

        Self {
            mode,
            state,
            manual_signal,
            handle: Some(handle),
        }
    }

    /// Wakes the MANUAL-mode loop. No-op for TRIGGER/LOOP consumers.
    pub fn trigger(&self) {
        if self.mode == Mode::Manual {
            self.manual_signal.set();
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConsumerState {
        self.state.get()
    }

    /// Wakes a MANUAL consumer (so it notices shutdown promptly) and joins
    /// the thread, bounded by `timeout` when given. Returns `true` if the
    /// thread terminated.
    pub fn join(&mut self, timeout: Option<Duration>) -> bool {
        self.manual_signal.set();

        let Some(handle) = self.handle.take() else {
            return true;
        };

        match timeout {
            None => handle.join().is_ok(),
            Some(timeout) => {
                let deadline = Instant::now() + timeout;
                loop {
                    if handle.is_finished() {
                        return handle.join().is_ok();
                    }
                    if Instant::now() >= deadline {
                        self.handle = Some(handle);
                        return false;
                    }
                    thread::sleep(Duration::from_millis(5));
                }
            }
        }
    }
}
