//! Scoped temporary file for an incoming upload
//!
//! The raw upload is streamed to `<millis>-<random>.<ext>` in the temp
//! directory and removed when the `TempUpload` is dropped, on success and
//! failure paths alike.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

const RANDOM_SUFFIX_LEN: usize = 8;
const MAX_EXTENSION_LEN: usize = 10;

/// Temporary copy of an uploaded file, deleted on drop
#[derive(Debug)]
pub struct TempUpload {
    file: NamedTempFile,
    writer: tokio::fs::File,
    original_filename: Option<String>,
    size_bytes: usize,
}

impl TempUpload {
    /// Create an empty temp file in `dir`, keeping the extension of `original_filename`.
    pub fn new_in(dir: &Path, original_filename: Option<&str>) -> Result<Self> {
        let extension = original_filename.and_then(sanitized_extension);
        let prefix = format!("{}-", chrono::Utc::now().timestamp_millis());
        let suffix = extension
            .as_deref()
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .rand_bytes(RANDOM_SUFFIX_LEN)
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;

        let writer = file
            .as_file()
            .try_clone()
            .context("Failed to open temp file for writing")?;

        Ok(Self {
            file,
            writer: tokio::fs::File::from_std(writer),
            original_filename: original_filename.map(str::to_string),
            size_bytes: 0,
        })
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.writer
            .write_all(chunk)
            .await
            .context("Failed to write upload chunk")?;
        self.size_bytes += chunk.len();
        Ok(())
    }

    /// Flush buffered data so the file can be read back by path.
    pub async fn finish(&mut self) -> Result<()> {
        self.writer
            .flush()
            .await
            .context("Failed to flush temp upload")?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.size_bytes == 0
    }

    pub fn original_filename(&self) -> Option<&str> {
        self.original_filename.as_deref()
    }

    /// Delete the file now instead of waiting for drop, reporting failures.
    pub fn remove(self) -> Result<PathBuf> {
        let path = self.file.path().to_path_buf();
        self.file
            .close()
            .with_context(|| format!("Failed to remove temp upload {}", path.display()))?;
        Ok(path)
    }
}

/// Lowercased alphanumeric extension, if the name has a usable one.
fn sanitized_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
