//! Mtime lookups for cache-busting timestamps.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Get the modification time of a regular file
///
/// Returns `None` if the file doesn't exist, is not a regular file,
/// or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    let meta = path.metadata().ok()?;
    if !meta.is_file() {
        return None;
    }
    meta.modified().ok()
}

/// Seconds since the Unix epoch (times before the epoch clamp to 0)
pub fn unix_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Get the file's mtime in Unix seconds if it changed within the last `max_age` seconds
///
/// Comparison is done on whole seconds: the file is recent when
/// `mtime > now - max_age`. A non-positive `max_age` never matches.
pub fn recent_mtime(path: &Path, max_age: i64, now: SystemTime) -> Option<u64> {
    if max_age <= 0 {
        return None;
    }
    let mtime = unix_secs(get_mtime(path)?);
    let threshold = now
        .checked_sub(Duration::from_secs(max_age.unsigned_abs()))
        .map(unix_secs)
        .unwrap_or(0);

    (mtime > threshold).then_some(mtime)
}
