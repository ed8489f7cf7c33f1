//! Lossy WebP encoding

use anyhow::{anyhow, Result};
use bytes::Bytes;
use image::{DynamicImage, GenericImageView};

/// WebP encoder with a fixed quality
#[derive(Debug, Clone, Copy)]
pub struct WebPCompressor {
    quality: f32,
}

impl WebPCompressor {
    /// Quality is clamped to the encoder's 0-100 range.
    pub fn new(quality: f32) -> Self {
        Self {
            quality: quality.clamp(0.0, 100.0),
        }
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Compress to lossy WebP
    pub fn compress(&self, img: &DynamicImage) -> Result<Bytes> {
        let (width, height) = img.dimensions();

        // Convert to RGBA for WebP encoding
        let rgba_img = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
        let webp_data = encoder
            .encode_simple(false, self.quality)
            .map_err(|e| anyhow!("WebP encoding failed: {:?}", e))?;

        Ok(Bytes::copy_from_slice(&webp_data))
    }
}
