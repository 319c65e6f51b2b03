//! Centralized output-name derivation for processed images.
//!
//! Every processed image is named the same way everywhere it appears — as a
//! file on disk and as an archive entry: the source name with its extension
//! stripped, a fixed `_no_bg` marker appended, and a `.png` extension (the
//! output is always PNG, the lossless format that carries the alpha channel).
//!
//! ## Collisions
//!
//! The derived name is a pure function of the source name. Two sources that
//! reduce to the same base (`photo.jpg` and `photo.png`) produce the same
//! output name; the derivation itself never disambiguates. On disk the later
//! write overwrites the earlier. The archive cannot hold two entries under
//! one name, so it appends an index to repeats (see [`crate::archive`]).

/// Marker appended to the stripped base name of every processed image.
pub const OUTPUT_SUFFIX: &str = "_no_bg";

/// Extension of every processed image. Output is always PNG.
pub const OUTPUT_EXTENSION: &str = "png";

/// Strip the extension from a file name: everything after the last `.` is
/// dropped. A name without a dot is returned whole.
///
/// Handles these patterns:
/// - `"wine1.jpg"` → `"wine1"`
/// - `"archive.tar.gz"` → `"archive.tar"` (last dot only)
/// - `"README"` → `"README"` (no dot)
/// - `".hidden"` → `""` (leading dot, empty base)
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[..pos],
        None => name,
    }
}

/// Derive the output name for a processed image from its source name.
///
/// `"wine1.jpg"` → `"wine1_no_bg.png"`
pub fn output_name(source_name: &str) -> String {
    format!(
        "{}{}.{}",
        strip_extension(source_name),
        OUTPUT_SUFFIX,
        OUTPUT_EXTENSION
    )
}
