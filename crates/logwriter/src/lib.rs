//! High-throughput async log writer with pluggable I/O strategies.
//!
//! Producers call [`Writer::send`] from any number of concurrent threads;
//! the facade forwards each line to a bounded [`logqueue::Queue`] under a
//! configurable [`BackpressurePolicy`], and a single dedicated consumer
//! thread drains, batches, and flushes to one of three [`DestinationKind`]
//! strategies (line-flushed, block-buffered, or memory-mapped).
//!
//! ```no_run
//! use logwriter::{create_writer, WriterConfig};
//!
//! let mut writer = create_writer(WriterConfig::durable("app.log")).unwrap();
//! writer.send(b"hello".to_vec()).unwrap();
//! writer.stop(Some(std::time::Duration::from_secs(5))).unwrap();
//! ```

mod config;
mod error;
#[cfg_attr(not(debug_assertions), allow(unused_macros, unused_imports))]
mod invariants;
mod writer;

pub use config::WriterConfig;
pub use error::WriterError;
pub use writer::{create_writer, Writer};

// Re-exports so callers need only depend on this facade crate for the types
// they need at the boundary.
pub use logqueue::{BackpressurePolicy, LogLine, Metrics, MetricsSnapshot};
pub use logwriter_consumer::{ConsumerState, Mode};
pub use logwriter_destinations::DestinationKind;
