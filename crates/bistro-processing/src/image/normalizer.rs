//! Image normalizer - turns an uploaded image into the stored derivative
//!
//! Pipeline:
//! 1. Decode (format guessed from content, not from the file name)
//! 2. Resize to the configured max width, keeping the aspect ratio, never enlarging
//! 3. Re-encode to lossy WebP

use crate::compression::WebPCompressor;
use crate::image::resize::fit_to_width;
use anyhow::Context;
use bistro_core::{AppError, ImageConfig};
use bytes::Bytes;
use image::imageops::FilterType;
use image::{GenericImageView, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// Encoded derivative image
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    /// Detected format of the source image
    pub source_format: String,
}

/// Decodes, resizes and re-encodes uploaded images
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    max_width: u32,
    compressor: WebPCompressor,
}

impl ImageNormalizer {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            max_width: config.max_width,
            compressor: WebPCompressor::new(config.quality),
        }
    }

    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    /// Normalize in-memory image bytes. CPU bound; call from a blocking context.
    pub fn normalize(&self, data: &[u8]) -> Result<NormalizedImage, anyhow::Error> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .context("Failed to read image")?;
        let source_format = reader
            .format()
            .map(|f| format!("{:?}", f))
            .unwrap_or_else(|| "unknown".to_string());
        let img = reader.decode().context("Failed to decode image")?;

        let (width, height) = img.dimensions();
        let img = match fit_to_width(width, height, self.max_width) {
            Some((new_width, new_height)) => {
                tracing::debug!(
                    from_width = width,
                    from_height = height,
                    to_width = new_width,
                    to_height = new_height,
                    "Resizing image"
                );
                img.resize_exact(new_width, new_height, FilterType::Lanczos3)
            }
            None => img,
        };

        let (width, height) = img.dimensions();
        let data = self
            .compressor
            .compress(&img)
            .context("Failed to encode image")?;

        Ok(NormalizedImage {
            data,
            width,
            height,
            source_format,
        })
    }

    /// Read an image file and normalize it on the blocking thread pool.
    #[tracing::instrument(skip(self), fields(max_width = self.max_width, quality = self.compressor.quality()))]
    pub async fn normalize_file(&self, path: &Path) -> Result<NormalizedImage, AppError> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            AppError::ImageProcessing(format!("Failed to read upload {}: {}", path.display(), e))
        })?;

        let normalizer = self.clone();
        let normalized = tokio::task::spawn_blocking(move || normalizer.normalize(&data))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to process image: {}", e)))?
            .map_err(|e: anyhow::Error| AppError::ImageProcessing(format!("{:#}", e)))?;

        tracing::info!(
            source_format = %normalized.source_format,
            width = normalized.width,
            height = normalized.height,
            size_bytes = normalized.data.len(),
            "Image normalized"
        );

        Ok(normalized)
    }
}
