//! Flat-background keying — the built-in segmenter.
//!
//! Estimates the background as the most common color along the image border,
//! then keys out every pixel within a per-channel tolerance of it. Built for
//! product photography on a uniform backdrop (a bottle on white seamless);
//! busy backgrounds need an external model behind the same
//! [`Segmenter`] trait.

use super::segmenter::{SegmentationError, Segmenter, SegmenterOutput};
use image::{DynamicImage, Rgba, RgbaImage};
use std::collections::HashMap;

/// Default keying tolerance — absorbs compression noise on a studio backdrop
/// without eating into the subject.
pub const DEFAULT_TOLERANCE: u8 = 16;

/// In-process segmenter that keys out a flat background color.
pub struct ColorKeySegmenter {
    tolerance: u8,
}

impl ColorKeySegmenter {
    /// `tolerance` is the maximum per-channel distance from the estimated
    /// background color at which a pixel is still keyed out (0 = exact
    /// matches only).
    pub fn new(tolerance: u8) -> Self {
        Self { tolerance }
    }
}

impl Default for ColorKeySegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

/// Most common color along the outermost pixel ring.
///
/// Ties break toward the larger RGB triple so the estimate is deterministic
/// regardless of hash iteration order.
fn estimate_background(image: &RgbaImage) -> [u8; 3] {
    let (w, h) = image.dimensions();
    let mut counts: HashMap<[u8; 3], usize> = HashMap::new();

    let mut tally = |x: u32, y: u32| {
        let p = image.get_pixel(x, y);
        *counts.entry([p[0], p[1], p[2]]).or_insert(0) += 1;
    };

    for x in 0..w {
        tally(x, 0);
        if h > 1 {
            tally(x, h - 1);
        }
    }
    for y in 1..h.saturating_sub(1) {
        tally(0, y);
        if w > 1 {
            tally(w - 1, y);
        }
    }

    counts
        .into_iter()
        .max_by_key(|&(color, count)| (count, color))
        .map(|(color, _)| color)
        .unwrap_or([255, 255, 255])
}

/// Largest per-channel distance between a color and a pixel's RGB part.
fn channel_distance(color: [u8; 3], pixel: &Rgba<u8>) -> u8 {
    color[0]
        .abs_diff(pixel[0])
        .max(color[1].abs_diff(pixel[1]))
        .max(color[2].abs_diff(pixel[2]))
}

impl Segmenter for ColorKeySegmenter {
    fn segment(&self, png_bytes: &[u8]) -> Result<SegmenterOutput, SegmentationError> {
        let mut bitmap = image::load_from_memory(png_bytes)
            .map_err(|e| SegmentationError::Backend(format!("input payload unreadable: {e}")))?
            .to_rgba8();

        let background = estimate_background(&bitmap);
        for pixel in bitmap.pixels_mut() {
            if channel_distance(background, pixel) <= self.tolerance {
                // Color survives under the zeroed alpha
                pixel[3] = 0;
            }
        }

        Ok(SegmenterOutput::Image(DynamicImage::ImageRgba8(bitmap)))
    }
}
