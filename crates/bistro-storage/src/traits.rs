//! Storage abstraction trait
//!
//! This module defines the Storage trait that derivative image backends implement.

use async_trait::async_trait;
use bistro_core::AppError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// A file written by a storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Internal identifier, used to delete the file
    pub key: String,
    /// Relative URL under which the file is served
    pub url: String,
    pub size_bytes: u64,
}

/// Storage abstraction trait
///
/// Backends pick a fresh timestamp-derived key for every write so concurrent
/// requests never overwrite each other's files.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under a new key ending in `extension`.
    ///
    /// A failed write leaves no partial file behind.
    async fn store(&self, extension: &str, data: &[u8]) -> StorageResult<StoredFile>;

    /// Delete a file by its key. Deleting a missing file is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether a file exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}
