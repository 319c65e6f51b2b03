//! Minimal bounding-box cropping over the alpha channel.
//!
//! All functions here are pure and testable without any IO. This is the
//! mandatory post-step of background removal: whatever the segmenter keeps
//! is cropped to the tightest rectangle that still contains it.

use image::{Rgba, RgbaImage, imageops};

/// Find the smallest axis-aligned rectangle containing every pixel with
/// alpha > 0.
///
/// # Returns
/// * `Some((x, y, width, height))` — minimal content rectangle
/// * `None` — the bitmap is fully transparent
pub fn alpha_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > 0 {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Crop a bitmap to the minimal rectangle covering its non-transparent
/// pixels.
///
/// A fully-transparent input yields a canonical 1×1 fully-transparent bitmap
/// — a defined result, not an error. The operation is idempotent: cropping
/// an already-cropped bitmap returns it unchanged.
pub fn crop_to_content(image: &RgbaImage) -> RgbaImage {
    match alpha_bounds(image) {
        Some((x, y, width, height)) => imageops::crop_imm(image, x, y, width, height).to_image(),
        None => RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0])),
    }
}
