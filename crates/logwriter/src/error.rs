use thiserror::Error;

/// Error types for writer-facade operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WriterError {
    /// `send` was called after `stop`/`close`, or the consumer closed the
    /// writer itself after an unrecoverable panic (`CorruptedState`).
    #[error("writer closed")]
    Closed,
    /// The consumer thread did not join within the requested timeout. The
    /// destination was not forcibly aborted; it keeps draining in the
    /// background and a later `stop`/`close` call may still succeed.
    #[error("shutdown did not complete within the requested timeout")]
    ShutdownTimedOut,
}
