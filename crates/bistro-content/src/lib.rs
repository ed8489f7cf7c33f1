//! Bistro content service client
//!
//! Read-only access to menu entries held by the hosted CMS.

pub mod contentful;

pub use contentful::ContentfulClient;

use async_trait::async_trait;
use bistro_core::{models::MenuEntry, AppError};

/// Source of content entries by content type
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// All entries of `content_type`, in the order the service returns them.
    async fn list_entries(&self, content_type: &str) -> Result<Vec<MenuEntry>, AppError>;
}
