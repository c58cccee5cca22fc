/// Backpressure policy applied by [`Queue::put`](crate::Queue::put) when the
/// queue is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackpressurePolicy {
    /// Append regardless of capacity. Keeps the producer path non-blocking
    /// at the cost of letting the queue grow past `maxsize`; this is the
    /// documented behavior, not an oversight (see `DESIGN.md`).
    #[default]
    Block,
    /// Reject the incoming line; `dropped` is incremented.
    DropNewest,
    /// Evict the line at the front, then append the new one; `dropped` is
    /// incremented for the evicted line.
    DropOldest,
    /// Same as `DropNewest`, but also emits a one-line stderr warning for
    /// every drop.
    Warn,
}
