//! Image processing — codec boundary, segmentation seam, cropping.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode PNG, JPEG** | `image` crate, in-memory ([`codec`]) |
//! | **Background removal** | [`Segmenter`] trait; built-in [`ColorKeySegmenter`] |
//! | **Content crop** | alpha bounding box + `imageops::crop_imm` |
//!
//! The module is split into:
//! - **Codec**: byte-level decode/encode and the accepted-input table
//! - **Segmenter**: [`Segmenter`] trait + tagged [`SegmenterOutput`] union
//! - **Color key**: [`ColorKeySegmenter`], the in-process segmenter
//! - **Remove**: [`remove_background`], the per-image operation
//! - **Crop**: pure bounding-box math (unit testable without IO)

pub mod codec;
pub mod color_key;
mod crop;
pub mod remove;
pub mod segmenter;

pub use codec::{is_supported_input, supported_input_extensions};
pub use color_key::{ColorKeySegmenter, DEFAULT_TOLERANCE};
pub use crop::crop_to_content;
pub use remove::remove_background;
pub use segmenter::{SegmentationError, Segmenter, SegmenterOutput};
