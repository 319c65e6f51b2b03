//! Segmentation collaborator seam.
//!
//! The [`Segmenter`] trait wraps the external capability that separates
//! foreground from background. Its contract is byte-in: the pipeline hands
//! over a PNG-encoded payload and receives either encoded bytes or an
//! already-decoded bitmap — [`SegmenterOutput`] makes that return shape an
//! explicit tagged union, resolved exactly once in
//! [`remove_background`](super::remove::remove_background).
//!
//! The production implementation is
//! [`ColorKeySegmenter`](super::color_key::ColorKeySegmenter) — in-process,
//! no model runtime required.

use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmentationError {
    /// The collaborator itself failed.
    #[error("segmentation failed: {0}")]
    Backend(String),
    /// The collaborator returned encoded bytes that do not decode as an image.
    #[error("segmenter returned undecodable image data: {0}")]
    InvalidOutput(#[source] image::ImageError),
    /// The input bitmap could not be encoded for the byte-in contract.
    #[error("could not encode input for segmentation: {0}")]
    InputEncode(#[source] image::ImageError),
}

/// The two shapes a segmenter may return.
#[derive(Debug)]
pub enum SegmenterOutput {
    /// Encoded image bytes, any decodable format.
    Bytes(Vec<u8>),
    /// Already-decoded bitmap, any channel layout.
    Image(DynamicImage),
}

/// Foreground/background separation capability.
///
/// Failure is signaled by an error, never by a sentinel value. `Send + Sync`
/// so one segmenter instance can be shared across rayon workers.
pub trait Segmenter: Send + Sync {
    /// Separate foreground from background in a PNG-encoded payload.
    fn segment(&self, png_bytes: &[u8]) -> Result<SegmenterOutput, SegmentationError>;
}
