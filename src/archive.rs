//! Zip packaging for batch downloads.
//!
//! When a batch produces more than one cutout, the CLI also writes a single
//! archive so the whole set ships as one file. Entries are deflate-compressed
//! PNGs named from their source (`wine1.jpg` → `wine1_no_bg.png`) and appear
//! in batch order.
//!
//! Assembly is fully in-memory: the archive comes back as bytes and the
//! caller decides where they land.

use crate::imaging::codec;
use crate::naming;
use image::RgbaImage;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// File name the archive is written under.
pub const ARCHIVE_FILE_NAME: &str = "images_no_background.zip";

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("could not encode {name} for archiving: {source}")]
    Encode {
        name: String,
        source: image::ImageError,
    },
}

/// Build a zip archive of cutouts, one PNG entry per `(source name, image)`
/// pair, in iteration order.
///
/// Two sources with the same base name would derive the same entry name, and
/// the zip format forbids that, so the repeat gets an index before the
/// extension: `photo_no_bg.png`, `photo_no_bg_1.png`. Every payload lands;
/// nothing is dropped. See [`crate::naming`].
pub fn build_archive<'a, I>(entries: I) -> Result<Vec<u8>, ArchiveError>
where
    I: IntoIterator<Item = (&'a str, &'a RgbaImage)>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut used = HashSet::new();

    for (source_name, image) in entries {
        let png = codec::encode_rgba_png(image).map_err(|source| ArchiveError::Encode {
            name: source_name.to_string(),
            source,
        })?;

        let entry_name = unique_entry_name(naming::output_name(source_name), &mut used);
        writer.start_file(entry_name.as_str(), options)?;
        writer.write_all(&png)?;
    }

    Ok(writer.finish()?.into_inner())
}

// The zip writer rejects a repeated entry name outright.
fn unique_entry_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let base = naming::strip_extension(&name);
    let mut index = 1;
    loop {
        let candidate = format!("{}_{}.{}", base, index, naming::OUTPUT_EXTENSION);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{rect_on_transparent, solid_rgba};
    use image::Rgba;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_back(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
        ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn one_entry_per_item_in_input_order() {
        let a = solid_rgba(4, 4, Rgba([255, 0, 0, 255]));
        let b = solid_rgba(6, 6, Rgba([0, 255, 0, 255]));
        let c = solid_rgba(8, 8, Rgba([0, 0, 255, 255]));

        let bytes =
            build_archive([("wine1.jpg", &a), ("wine2.png", &b), ("wine3.jpeg", &c)]).unwrap();
        let mut archive = read_back(bytes);

        assert_eq!(archive.len(), 3);
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["wine1_no_bg.png", "wine2_no_bg.png", "wine3_no_bg.png"]
        );
    }

    #[test]
    fn entries_decode_back_to_the_same_pixels() {
        let original = rect_on_transparent(10, 6, (2, 1, 5, 3));
        let bytes = build_archive([("bottle.png", &original)]).unwrap();
        let mut archive = read_back(bytes);

        let mut entry_bytes = Vec::new();
        archive
            .by_index(0)
            .unwrap()
            .read_to_end(&mut entry_bytes)
            .unwrap();

        let decoded = codec::decode(&entry_bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (10, 6));
        assert_eq!(decoded.get_pixel(3, 2), &Rgba([255, 0, 0, 255]));
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn entries_use_deflate() {
        let img = solid_rgba(16, 16, Rgba([7, 7, 7, 255]));
        let bytes = build_archive([("flat.png", &img)]).unwrap();
        let mut archive = read_back(bytes);

        let entry = archive.by_index(0).unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
    }

    #[test]
    fn colliding_bases_get_indexed_entries() {
        // photo.png, photo.jpg and photo.jpeg all reduce to photo_no_bg.png;
        // repeats get an index and every payload still lands, in batch order.
        let a = solid_rgba(2, 2, Rgba([1, 1, 1, 255]));
        let b = solid_rgba(3, 3, Rgba([2, 2, 2, 255]));
        let c = solid_rgba(4, 4, Rgba([3, 3, 3, 255]));

        let bytes =
            build_archive([("photo.png", &a), ("photo.jpg", &b), ("photo.jpeg", &c)]).unwrap();
        let mut archive = read_back(bytes);

        assert_eq!(archive.len(), 3);
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["photo_no_bg.png", "photo_no_bg_1.png", "photo_no_bg_2.png"]
        );

        // The indexed entry carries the payload from its source position.
        let mut entry_bytes = Vec::new();
        archive
            .by_index(1)
            .unwrap()
            .read_to_end(&mut entry_bytes)
            .unwrap();
        let decoded = codec::decode(&entry_bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 3));
    }

    #[test]
    fn indexed_name_skips_a_taken_slot() {
        // A genuine source already occupying the first index slot: the
        // repeat moves past it instead of colliding again.
        let a = solid_rgba(2, 2, Rgba([1, 1, 1, 255]));
        let b = solid_rgba(3, 3, Rgba([2, 2, 2, 255]));

        let mut used = HashSet::new();
        assert_eq!(
            unique_entry_name("photo_no_bg.png".to_string(), &mut used),
            "photo_no_bg.png"
        );
        used.insert("photo_no_bg_1.png".to_string());
        assert_eq!(
            unique_entry_name("photo_no_bg.png".to_string(), &mut used),
            "photo_no_bg_2.png"
        );

        // End to end the same guarantee holds: never an error, every
        // payload present.
        let bytes = build_archive([("photo.png", &a), ("photo.png", &b)]).unwrap();
        assert_eq!(read_back(bytes).len(), 2);
    }

    #[test]
    fn empty_input_builds_an_empty_archive() {
        let bytes = build_archive(std::iter::empty::<(&str, &RgbaImage)>()).unwrap();
        let archive = read_back(bytes);
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn archive_file_name_is_stable() {
        assert_eq!(ARCHIVE_FILE_NAME, "images_no_background.zip");
    }
}
