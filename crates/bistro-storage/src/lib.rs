//! Bistro Storage Library
//!
//! Storage abstraction for derivative images and its local filesystem
//! implementation.
//!
//! # Key format
//!
//! Keys are flat file names derived from the current timestamp in
//! milliseconds plus an extension, e.g. `1700000000000.webp`. When the name is
//! already taken a counter is appended: `1700000000000-1.webp`. Keys must not
//! contain path separators or `..`.

pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredFile};
