//! File modification-time probe.
//!
//! The reload protocol only ever needs two things from the filesystem: the
//! modification time of the backing file, and its full content once the time
//! has moved forward. Both live here so the reload skeleton stays free of I/O
//! details.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Modification time of the file at `path`.
///
/// Fails when the file is missing, unreadable, or the platform does not
/// record modification times.
pub fn last_modified(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

/// Read the whole file as UTF-8 text.
///
/// A leading byte-order mark is dropped so the first word of a dictionary
/// saved by Windows editors still matches.
pub fn read_text(path: &Path) -> io::Result<String> {
    let content = fs::read_to_string(path)?;
    match content.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(content),
    }
}
