//! Width-bounded resize calculation

/// Dimensions that fit `width x height` into `max_width` while keeping the
/// aspect ratio.
///
/// Returns `None` when the image already fits; images are never enlarged.
pub fn fit_to_width(width: u32, height: u32, max_width: u32) -> Option<(u32, u32)> {
    if width <= max_width || width == 0 {
        return None;
    }

    let scaled = (height as u64 * max_width as u64 + width as u64 / 2) / width as u64;
    let new_height = scaled.clamp(1, u32::MAX as u64) as u32;

    Some((max_width, new_height))
}
