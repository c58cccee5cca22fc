use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::common::ensure_parent_dir;
use crate::destination::Destination;
use crate::error::DestinationError;

/// Line-buffered destination.
///
/// Opens the file in append mode per batch; each line is written and then
/// handed to `sync_data` individually, so a line reaches the device before
/// the next one is attempted. Strongest in-class durability, at the cost of
/// a flush syscall per line.
pub struct LineDestination {
    path: PathBuf,
}

impl LineDestination {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Destination for LineDestination {
    fn write_batch(&mut self, lines: &[Vec<u8>]) -> Result<(), DestinationError> {
        if lines.is_empty() {
            return Ok(());
        }
        ensure_parent_dir(&self.path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        for line in lines {
            file.write_all(line)?;
            file.write_all(b"\n")?;
            file.sync_data()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DestinationError> {
        // Every batch is already synced line-by-line; nothing buffered
        // between calls.
        Ok(())
    }

    fn close(&mut self) -> Result<(), DestinationError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_newline_terminated_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let mut dest = LineDestination::new(&path);

        dest.write_batch(&[b"a".to_vec(), b"b".to_vec(), b"c".to_vec()])
            .unwrap();
        dest.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a\nb\nc\n");
    }

    #[test]
    fn appends_across_batches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let mut dest = LineDestination::new(&path);

        dest.write_batch(&[b"a".to_vec()]).unwrap();
        dest.write_batch(&[b"b".to_vec()]).unwrap();
        dest.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a\nb\n");
    }

    #[test]
    fn empty_batch_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let mut dest = LineDestination::new(&path);
        dest.write_batch(&[]).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("out.log");
        let mut dest = LineDestination::new(&path);
        dest.write_batch(&[b"a".to_vec()]).unwrap();
        assert!(path.exists());
    }
}
