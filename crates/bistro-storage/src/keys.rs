//! Timestamp-derived key generation shared by storage backends.

use chrono::Utc;

/// Build a key from a millisecond timestamp, a collision counter and an extension.
///
/// Attempt `0` yields `{millis}.{ext}`; later attempts yield `{millis}-{attempt}.{ext}`.
pub fn timestamp_key(millis: i64, attempt: u32, extension: &str) -> String {
    let extension = extension.trim_start_matches('.');
    if attempt == 0 {
        format!("{}.{}", millis, extension)
    } else {
        format!("{}-{}.{}", millis, attempt, extension)
    }
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Flat keys only: no separators, no parent references, not empty.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.contains("..")
        && !key.contains('/')
        && !key.contains('\\')
        && !key.starts_with('.')
}
