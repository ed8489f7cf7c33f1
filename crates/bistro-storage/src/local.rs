use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult, StoredFile};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Attempts at finding a free key before giving up.
const MAX_KEY_ATTEMPTS: u32 = 16;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    url_prefix: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Flat directory holding the files (e.g., "uploads")
    /// * `url_prefix` - Prefix under which the directory is served (e.g., "/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, url_prefix: impl Into<String>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            url_prefix: url_prefix.into(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert storage key to filesystem path with security validation
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if !keys::is_valid_key(key) {
            return Err(StorageError::InvalidKey(format!(
                "Storage key contains invalid characters: {}",
                key
            )));
        }
        Ok(self.base_path.join(key))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.url_prefix.trim_end_matches('/'), key)
    }

    /// Create a file that did not exist before, picking the next free key.
    async fn create_exclusive(&self, extension: &str) -> StorageResult<(String, PathBuf, fs::File)> {
        let millis = keys::now_millis();

        for attempt in 0..MAX_KEY_ATTEMPTS {
            let key = keys::timestamp_key(millis, attempt, extension);
            let path = self.key_to_path(&key)?;

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((key, path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(StorageError::UploadFailed(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        Err(StorageError::UploadFailed(format!(
            "No free file name for timestamp {} after {} attempts",
            millis, MAX_KEY_ATTEMPTS
        )))
    }

    async fn write_all(file: &mut fs::File, path: &Path, data: &[u8]) -> StorageResult<()> {
        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(&self, extension: &str, data: &[u8]) -> StorageResult<StoredFile> {
        let start = std::time::Instant::now();
        let (key, path, mut file) = self.create_exclusive(extension).await?;

        if let Err(err) = Self::write_all(&mut file, &path, data).await {
            drop(file);
            if let Err(cleanup_err) = fs::remove_file(&path).await {
                tracing::warn!(
                    error = %cleanup_err,
                    path = %path.display(),
                    "Failed to remove partially written file"
                );
            }
            return Err(err);
        }

        let url = self.generate_url(&key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(StoredFile {
            key,
            url,
            size_bytes: data.len() as u64,
        })
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), key = %key, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await?)
    }
}
