//! Aspect-preserving resize to a target width.

use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

/// Largest width or height of a composed image, in pixels.
pub const MAX_OUTPUT_DIMENSION: u32 = 10_000;

/// Largest pixel count of a composed image.
pub const MAX_OUTPUT_PIXELS: u64 = 25_000_000;

/// Output dimensions for scaling `(width, height)` to `target_width`.
///
/// `target_width` is clamped to `1..=MAX_OUTPUT_DIMENSION`, and
/// `height = round(target_width * height / width)`, never below 1. Returns
/// `None` when the height would exceed [`MAX_OUTPUT_DIMENSION`] or the area
/// [`MAX_OUTPUT_PIXELS`].
pub fn target_dimensions(width: u32, height: u32, target_width: u32) -> Option<(u32, u32)> {
    let target_width = target_width.clamp(1, MAX_OUTPUT_DIMENSION);
    let scaled = (u64::from(target_width) * u64::from(height)) as f64 / f64::from(width.max(1));
    let new_height = scaled.round().max(1.0);
    if new_height > f64::from(MAX_OUTPUT_DIMENSION) {
        return None;
    }
    let new_height = new_height as u32;
    if u64::from(target_width) * u64::from(new_height) > MAX_OUTPUT_PIXELS {
        return None;
    }
    Some((target_width, new_height))
}

/// Resize to `target_width`, keeping the aspect ratio.
///
/// Lanczos3 resampling; the result depends only on the inputs. `None` when
/// the result would be too large (see [`target_dimensions`]).
pub fn resize_to_width(img: &DynamicImage, target_width: u32) -> Option<DynamicImage> {
    let (w, h) = target_dimensions(img.width(), img.height(), target_width)?;
    debug!(
        "Resizing {}x{} → {}x{}",
        img.width(),
        img.height(),
        w,
        h
    );
    Some(img.resize_exact(w, h, FilterType::Lanczos3))
}
