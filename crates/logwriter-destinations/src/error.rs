use thiserror::Error;

/// Error types for destination operations.
#[derive(Debug, Error)]
pub enum DestinationError {
    /// The underlying file operation failed (permission, ENOSPC, EBADF, ...).
    #[error("destination io error: {0}")]
    Io(#[from] std::io::Error),
    /// A batch's byte length would push the mmap destination past its
    /// preallocated region. Treated as a `DestinationIO`-class error with a
    /// distinct message, per the reference behavior: the batch is failed,
    /// not grown into.
    #[error("batch of {attempted} bytes exceeds mmap preallocation of {capacity} bytes")]
    PreallocationExceeded { capacity: usize, attempted: usize },
}
