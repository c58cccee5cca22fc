//! Memory-mapped destination. Unix only, gated behind `cfg(unix)` since the
//! raw `mmap`/`munmap`/`msync` bindings have no portable stdlib equivalent.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::PathBuf;
use std::ptr;

use crate::common::{ensure_parent_dir, join_batch};
use crate::destination::Destination;
use crate::error::DestinationError;

const PREALLOC: usize = 32 * 1024 * 1024;

struct Mapping {
    file: File,
    ptr: *mut libc::c_void,
    len: usize,
    offset: usize,
}

// Safety: the mapping is only ever touched from the single consumer thread
// that owns the `MmapDestination`; the raw pointer itself carries no
// thread affinity.
unsafe impl Send for Mapping {}

/// Memory-mapped destination.
///
/// On first write: opens the file read-write-create, preallocates
/// [`PREALLOC`] bytes, and maps the full region. Each batch copies its
/// joined bytes at the current offset. A batch that would exceed the
/// preallocated region fails with
/// [`DestinationError::PreallocationExceeded`] rather than growing the
/// mapping (the reference behavior — see `DESIGN.md`).
///
/// On close: `msync`, `munmap`, then truncate the file to the exact number
/// of bytes written.
pub struct MmapDestination {
    path: PathBuf,
    mapping: Option<Mapping>,
}

impl MmapDestination {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mapping: None,
        }
    }

    fn ensure_mapped(&mut self) -> Result<(), DestinationError> {
        if self.mapping.is_some() {
            return Ok(());
        }
        ensure_parent_dir(&self.path)?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)?;
        file.set_len(PREALLOC as u64)?;

        let fd = file.as_raw_fd();
        // Safety: `fd` is a valid, open file descriptor sized to at least
        // `PREALLOC` bytes (set_len above); the returned pointer is checked
        // for MAP_FAILED immediately below.
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                PREALLOC,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            return Err(DestinationError::Io(io::Error::last_os_error()));
        }

        self.mapping = Some(Mapping {
            file,
            ptr,
            len: PREALLOC,
            offset: 0,
        });
        Ok(())
    }

    fn unmap(mapping: &Mapping) -> Result<(), DestinationError> {
        // Safety: `mapping.ptr`/`mapping.len` describe the live mapping
        // created in `ensure_mapped`.
        let rc = unsafe { libc::munmap(mapping.ptr, mapping.len) };
        if rc != 0 {
            return Err(DestinationError::Io(io::Error::last_os_error()));
        }
        Ok(())
    }
}

impl Destination for MmapDestination {
    fn write_batch(&mut self, lines: &[Vec<u8>]) -> Result<(), DestinationError> {
        if lines.is_empty() {
            return Ok(());
        }
        self.ensure_mapped()?;
        let data = join_batch(lines);

        let mapping = self.mapping.as_mut().expect("just mapped");
        let end = mapping.offset + data.len();
        if end > mapping.len {
            return Err(DestinationError::PreallocationExceeded {
                capacity: mapping.len,
                attempted: end,
            });
        }

        // Safety: `end <= mapping.len` was just checked; `dst` stays within
        // the mapped region.
        unsafe {
            let dst = (mapping.ptr as *mut u8).add(mapping.offset);
            ptr::copy_nonoverlapping(data.as_ptr(), dst, data.len());
        }
        mapping.offset = end;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DestinationError> {
        if let Some(mapping) = &self.mapping {
            // Safety: mapping is live for as long as `self.mapping` is `Some`.
            let rc = unsafe { libc::msync(mapping.ptr, mapping.len, libc::MS_SYNC) };
            if rc != 0 {
                return Err(DestinationError::Io(io::Error::last_os_error()));
            }
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), DestinationError> {
        let Some(mapping) = self.mapping.take() else {
            return Ok(());
        };

        let sync_result = {
            // Safety: see `flush`.
            let rc = unsafe { libc::msync(mapping.ptr, mapping.len, libc::MS_SYNC) };
            if rc != 0 {
                Err(DestinationError::Io(io::Error::last_os_error()))
            } else {
                Ok(())
            }
        };
        let unmap_result = Self::unmap(&mapping);
        mapping.file.set_len(mapping.offset as u64)?;

        sync_result?;
        unmap_result
    }

    fn name(&self) -> &str {
        "mmap"
    }
}

impl Drop for MmapDestination {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
