//! Byte-level codec boundary — the only place raw image bytes are decoded
//! or encoded.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode (JPEG, PNG)** | `image::load_from_memory` (format sniffed from content) |
//! | **Encode → PNG** | `write_to` with `ImageFormat::Png` into an in-memory buffer |
//!
//! Everything is in-memory: inputs arrive as byte payloads and outputs leave
//! as byte payloads. File IO lives in the CLI layer.

use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions whose decoders are compiled in and accepted as input.
const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of input file extensions with working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Whether a path's extension marks it as an accepted input image.
pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

/// Decode raw bytes into a bitmap. The format is sniffed from the content,
/// not from any file name, so a mislabeled `.png` holding JPEG data still
/// decodes.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(bytes)
}

/// Encode a bitmap to PNG bytes in memory, preserving its channel layout.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Encode an RGBA bitmap to PNG bytes in memory. Every processed result —
/// per-item download and archive entry alike — is encoded through here.
pub fn encode_rgba_png(image: &RgbaImage) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
