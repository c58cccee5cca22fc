use std::path::Path;

use crate::error::DestinationError;

/// Ensures `path`'s parent directory exists, creating it (and any missing
/// ancestors) if necessary. Every destination calls this before its first
/// write.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), DestinationError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Joins lines with `\n` and appends a trailing `\n`, matching the wire
/// contract: one record per line, newline-terminated, no newline inside a
/// line implied by the caller.
pub(crate) fn join_batch(lines: &[Vec<u8>]) -> Vec<u8> {
    let newline_count = lines.len();
    let total_len: usize = lines.iter().map(Vec::len).sum::<usize>() + newline_count;
    let mut out = Vec::with_capacity(total_len);
    for line in lines {
        out.extend_from_slice(line);
        out.push(b'\n');
    }
    out
}
