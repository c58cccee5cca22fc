use std::path::PathBuf;

use crate::block::BlockDestination;
use crate::destination::Destination;
use crate::line::LineDestination;
#[cfg(unix)]
use crate::mmap::MmapDestination;

/// Tag identifying which write strategy a destination should use.
///
/// Held by [`Destination`] consumers as a plain enum rather than a trait
/// object until construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationKind {
    /// Per-line, OS-flushed writes. Strongest durability, one syscall per line.
    Line,
    /// 64 KiB userspace-buffered writes. Default for high throughput.
    Block,
    /// `mmap`-backed writes into a preallocated region. Unix only.
    #[cfg(unix)]
    Mmap,
}

/// Builds the boxed [`Destination`] for `kind`, targeting `path`.
pub fn build(kind: DestinationKind, path: impl Into<PathBuf>) -> Box<dyn Destination> {
    let path = path.into();
    match kind {
        DestinationKind::Line => Box::new(LineDestination::new(path)),
        DestinationKind::Block => Box::new(BlockDestination::new(path)),
        #[cfg(unix)]
        DestinationKind::Mmap => Box::new(MmapDestination::new(path)),
    }
}
