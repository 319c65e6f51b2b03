//! # Cutout
//!
//! Batch background removal for product photography. Feed it JPEG or PNG
//! shots, get back tightly cropped transparent PNGs, one per input, plus a
//! zip archive whenever a batch yields more than one cutout.
//!
//! # Architecture: One Pipeline, Isolated Items
//!
//! Every input runs the same per-image sequence; the batch layer fans the
//! work out and gathers results without letting one bad file sink the rest:
//!
//! ```text
//! inputs ─▶ decode ─▶ segment ─▶ crop ─▶ RgbaImage     (per item, parallel)
//!                                          │
//!                       PNG files ◀────────┴────────▶ zip (when >1 succeed)
//! ```
//!
//! This shape exists for three reasons:
//!
//! - **Failure isolation**: a corrupt download or a segmenter refusal marks
//!   that one item failed; every other item still produces its cutout.
//! - **Stable ordering**: results, report rows, and archive entries all come
//!   back in input order no matter which worker finished first.
//! - **Testability**: segmentation sits behind a trait, so the whole batch
//!   layer is exercised with a scripted mock and no model in sight.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`inputs`] | Expands CLI arguments into an ordered list of image files |
//! | [`batch`] | Runs the per-image pipeline in parallel, collects per-item results, emits progress |
//! | [`imaging`] | Decode/encode boundary, the [`imaging::Segmenter`] seam, the built-in color-key segmenter, the content crop |
//! | [`naming`] | `<base>_no_bg.png` output naming convention |
//! | [`archive`] | Zip packaging of batch results for a single download |
//! | [`output`] | CLI output formatting — progress lines and the run summary |
//!
//! # Design Decisions
//!
//! ## Segmentation Behind a Trait
//!
//! Background removal is the one step this crate does not want to own an
//! opinion about: today it is a color key, tomorrow it may be an ONNX
//! matting model or a remote API. The [`imaging::Segmenter`] trait takes
//! PNG bytes and returns a tagged [`imaging::SegmenterOutput`] — either
//! encoded bytes or an already-decoded bitmap — because real backends
//! genuinely differ in what they hand back. Everything downstream
//! (normalization, crop, naming, archiving) is segmenter-agnostic.
//!
//! ## Built-In Color Key
//!
//! The default segmenter targets the common product-photography case:
//! a subject shot against a uniform backdrop. It estimates the backdrop
//! color from the image border and keys matching pixels transparent.
//! No model download, no network, deterministic output. See
//! [`imaging::ColorKeySegmenter`].
//!
//! ## Every Cutout Is Cropped
//!
//! Cutouts always ship trimmed to their opaque content. Product images go
//! on to be composed into catalogs and storefronts, where dead transparent
//! margins are pure nuisance. An image with no opaque pixels at all
//! collapses to a single transparent pixel instead of failing: an empty
//! segmentation is a sensible (if suspicious) result, not an error.
//!
//! ## Archive Only Above One
//!
//! A single cutout is its own deliverable; wrapping one file in a zip
//! helps nobody. The archive appears exactly when a batch produces two or
//! more successful cutouts, bundling them for a one-click download.
//!
//! ## Progress as a Channel
//!
//! The batch layer never prints. It emits [`batch::BatchEvent`]s over an
//! optional channel and the binary decides how to render them. The count
//! in those events is monotonic even under parallelism, so any consumer
//! can drive a progress bar directly.

pub mod archive;
pub mod batch;
pub mod imaging;
pub mod inputs;
pub mod naming;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
