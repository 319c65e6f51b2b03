//! Background removal — the per-image operation.
//!
//! Combines the codec, the segmenter seam, and the cropper into the single
//! operation the batch runs per item. The stages, in order:
//!
//! 1. PNG-encode the input bitmap (the collaborator contract is byte-in).
//! 2. Invoke the segmenter; resolve its tagged output once — encoded bytes
//!    are decoded, a returned bitmap is used directly.
//! 3. Normalize to RGBA: an alpha-less layout gains an opaque alpha channel.
//! 4. Crop to the minimal rectangle covering the surviving foreground —
//!    a mandatory post-step, never skipped.

use super::codec;
use super::crop::crop_to_content;
use super::segmenter::{SegmentationError, Segmenter, SegmenterOutput};
use image::{DynamicImage, RgbaImage};

/// Remove the background from a bitmap and crop the result to its content.
///
/// The returned bitmap always carries an alpha channel, whatever channel
/// layout the collaborator produced. A result with no surviving foreground
/// comes back as the canonical 1×1 transparent bitmap, not as an error.
pub fn remove_background(
    segmenter: &impl Segmenter,
    image: &DynamicImage,
) -> Result<RgbaImage, SegmentationError> {
    let payload = codec::encode_png(image).map_err(SegmentationError::InputEncode)?;

    let cut = match segmenter.segment(&payload)? {
        SegmenterOutput::Bytes(bytes) => {
            codec::decode(&bytes).map_err(SegmentationError::InvalidOutput)?
        }
        SegmenterOutput::Image(bitmap) => bitmap,
    };

    Ok(crop_to_content(&cut.to_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::segmenter::tests::MockSegmenter;
    use crate::test_helpers::rect_on_transparent;
    use image::{Rgba, RgbImage};

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn rgb_input(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, image::Rgb([120, 130, 140])))
    }

    #[test]
    fn collaborator_receives_png_payload() {
        let mock = MockSegmenter::echo();
        remove_background(&mock, &rgb_input(6, 4)).unwrap();

        let payloads = mock.received_payloads();
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0].starts_with(PNG_MAGIC));
    }

    #[test]
    fn bytes_output_is_decoded_and_normalized() {
        // Echo returns the RGB-encoded payload; normalization adds alpha
        let mock = MockSegmenter::echo();
        let result = remove_background(&mock, &rgb_input(6, 4)).unwrap();

        assert_eq!(result.dimensions(), (6, 4));
        assert!(result.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn image_output_without_alpha_gains_opaque_alpha() {
        let returned = DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 5, image::Rgb([9, 9, 9])));
        let mock = MockSegmenter::with_image(returned);

        let result = remove_background(&mock, &rgb_input(5, 5)).unwrap();
        assert!(result.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn result_is_cropped_to_foreground() {
        let cut = DynamicImage::ImageRgba8(rect_on_transparent(20, 10, (5, 2, 8, 4)));
        let mock = MockSegmenter::with_image(cut);

        let result = remove_background(&mock, &rgb_input(20, 10)).unwrap();
        assert_eq!(result.dimensions(), (8, 4));
    }

    #[test]
    fn fully_transparent_result_is_canonical_pixel() {
        let cut = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            12,
            12,
            Rgba([0, 0, 0, 0]),
        ));
        let mock = MockSegmenter::with_image(cut);

        let result = remove_background(&mock, &rgb_input(12, 12)).unwrap();
        assert_eq!(result.dimensions(), (1, 1));
        assert_eq!(result.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn backend_failure_propagates() {
        let mock = MockSegmenter::failing("model crashed");
        let err = remove_background(&mock, &rgb_input(4, 4)).unwrap_err();
        assert!(matches!(err, SegmentationError::Backend(_)));
    }

    #[test]
    fn undecodable_bytes_output_is_invalid_output() {
        let mock = MockSegmenter::with_bytes(b"model spoke gibberish".to_vec());
        let err = remove_background(&mock, &rgb_input(4, 4)).unwrap_err();
        assert!(matches!(err, SegmentationError::InvalidOutput(_)));
    }
}
