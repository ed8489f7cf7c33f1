//! Application state shared by all handlers
//!
//! Everything here is immutable after startup; the store, content client and
//! storage backend own their own concurrency.

use bistro_content::ContentSource;
use bistro_db::BusinessStore;
use bistro_processing::ImageNormalizer;
use bistro_storage::Storage;
use std::path::PathBuf;
use std::sync::Arc;

/// Where incoming uploads are spooled while they are processed
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub temp_dir: PathBuf,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BusinessStore>,
    pub content: Arc<dyn ContentSource>,
    pub storage: Arc<dyn Storage>,
    pub normalizer: ImageNormalizer,
    pub upload: UploadConfig,
    /// Content type id of menu entries in the content service
    pub menu_content_type: String,
    /// Error bodies omit the error chain when set
    pub production: bool,
}
