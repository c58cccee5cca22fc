use thiserror::Error;

/// Error types for queue operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue has observed the stop sentinel; no further reads are possible.
    #[error("queue is closed")]
    Closed,
}
