use crate::error::DestinationError;

/// Capability interface implemented by every write strategy.
///
/// Kept object-safe since the consumer holds its destination as
/// `Box<dyn Destination>` and calls are always synchronous — no boxed-future
/// split is needed here.
pub trait Destination: Send {
    /// Writes an ordered, non-empty batch of lines, each newline-terminated
    /// on disk. On success the batch is fully committed to whatever the
    /// strategy calls "written" (see each destination's docs).
    fn write_batch(&mut self, lines: &[Vec<u8>]) -> Result<(), DestinationError>;

    /// Forces durable progress as best the strategy allows.
    fn flush(&mut self) -> Result<(), DestinationError>;

    /// Releases all resources. Must be idempotent.
    fn close(&mut self) -> Result<(), DestinationError>;

    /// Short name for diagnostics.
    fn name(&self) -> &str;
}
