//! Bistro Processing Library
//!
//! Image normalization for uploaded business images and the scoped temporary
//! file that holds an upload while it is processed.

pub mod compression;
pub mod image;
pub mod upload;

pub use crate::image::{ImageNormalizer, NormalizedImage};
pub use upload::TempUpload;
