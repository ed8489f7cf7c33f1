//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;

use crate::state::{AppState, UploadConfig};
use anyhow::{Context, Result};
use bistro_content::ContentfulClient;
use bistro_core::{constants::UPLOADS_URL_PREFIX, Config};
use bistro_db::BusinessRepository;
use bistro_processing::ImageNormalizer;
use bistro_storage::LocalStorage;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config.environment)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    if !config.content.is_configured() {
        tracing::warn!(
            "CONTENTFUL_SPACE_ID / CONTENTFUL_ACCESS_TOKEN not set; GET /menu will fail until configured"
        );
    }

    let pool = database::setup_database(&config).await?;

    let storage = LocalStorage::new(&config.uploads_dir, UPLOADS_URL_PREFIX)
        .await
        .context("Failed to initialize uploads directory")?;
    tracing::info!(path = %storage.base_path().display(), "Local storage initialized");

    tokio::fs::create_dir_all(&config.upload_temp_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload temp directory {}",
                config.upload_temp_dir.display()
            )
        })?;

    let content = ContentfulClient::new(&config.content)?;

    let state = Arc::new(AppState {
        store: Arc::new(BusinessRepository::new(pool)),
        content: Arc::new(content),
        storage: Arc::new(storage),
        normalizer: ImageNormalizer::new(&config.image),
        upload: UploadConfig {
            temp_dir: config.upload_temp_dir.clone(),
        },
        menu_content_type: config.content.menu_content_type.clone(),
        production: config.is_production(),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
