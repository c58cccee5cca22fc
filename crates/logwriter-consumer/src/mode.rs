/// Consumer loop variant, chosen at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Blocks on the queue, wakes on each message, drains opportunistically,
    /// flushes on batch-size or flush-interval.
    Trigger,
    /// Wakes on a periodic timer; drains available items each tick,
    /// flushes on batch-size or each tick.
    Loop,
    /// Waits on a manual-trigger signal; drains and flushes only when the
    /// caller invokes `trigger()` or on shutdown.
    Manual,
}
