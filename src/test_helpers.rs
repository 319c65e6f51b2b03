//! Shared test utilities for the cutout test suite.
//!
//! Provides small bitmap constructors and in-memory encoders so unit tests
//! can build inputs without fixture files on disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! // A 20x10 canvas with an opaque 8x4 rectangle at (5, 2).
//! let img = rect_on_transparent(20, 10, (5, 2, 8, 4));
//!
//! // Encoded payloads for the codec boundary.
//! let png = rgb_png_bytes(12, 8, [200, 10, 10]);
//! let jpeg = rgb_jpeg_bytes(12, 8, [200, 10, 10]);
//! ```

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

// =========================================================================
// Bitmap constructors
// =========================================================================

/// A `width` x `height` bitmap filled with one RGBA color.
pub fn solid_rgba(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// A fully transparent canvas with one opaque red rectangle.
///
/// `rect` is `(x, y, width, height)` of the opaque region. Tests use this to
/// assert crop geometry: the content bounds are exactly `rect`.
pub fn rect_on_transparent(width: u32, height: u32, rect: (u32, u32, u32, u32)) -> RgbaImage {
    let (rx, ry, rw, rh) = rect;
    RgbaImage::from_fn(width, height, |x, y| {
        if x >= rx && x < rx + rw && y >= ry && y < ry + rh {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

// =========================================================================
// Encoded payloads
// =========================================================================

/// PNG bytes for a solid RGB image (no alpha channel).
pub fn rgb_png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// JPEG bytes for a solid RGB image.
pub fn rgb_jpeg_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf.into_inner()
}

/// PNG bytes for an RGBA bitmap, alpha preserved.
pub fn rgba_png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}
