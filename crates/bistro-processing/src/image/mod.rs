//! Image processing module
//!
//! - Width fitting that never enlarges (resize)
//! - Decode, resize and re-encode pipeline (normalizer)

pub mod normalizer;
pub mod resize;

pub use normalizer::{ImageNormalizer, NormalizedImage};
pub use resize::fit_to_width;
