//! Bounded, multi-producer / single-consumer queue with pluggable
//! backpressure policies and writer metrics.
//!
//! This is the leaf crate of the `logwriter` workspace: it has no notion of
//! destinations, batching, or modes — just handing opaque [`LogLine`]s from
//! producers to a single consumer.

mod error;
#[cfg_attr(not(debug_assertions), allow(unused_macros, unused_imports))]
mod invariants;
mod metrics;
mod policy;
mod queue;

pub use error::QueueError;
pub use metrics::{Metrics, MetricsSnapshot};
pub use policy::BackpressurePolicy;
pub use queue::{GetResult, LogLine, Queue};
