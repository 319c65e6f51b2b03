//! Input collection for the CLI.
//!
//! Expands the positional arguments into a flat, ordered list of image
//! files:
//!
//! - A **file** argument is taken verbatim, whatever its extension. The
//!   user named it explicitly; if it turns out not to decode, that shows
//!   up as a per-item failure rather than a silent skip.
//! - A **directory** argument is walked recursively; only files whose
//!   extension has a compiled-in decoder are kept, sorted by path so runs
//!   are deterministic.
//!
//! Argument order is preserved: each argument's expansion lands in the
//! list before the next argument is looked at.

use crate::imaging::is_supported_input;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input not found: {0}")]
    NotFound(PathBuf),
}

/// Expand CLI path arguments into the ordered list of files to process.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, InputError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(walk_images(path)?);
        } else {
            return Err(InputError::NotFound(path.clone()));
        }
    }

    Ok(files)
}

fn walk_images(dir: &Path) -> Result<Vec<PathBuf>, InputError> {
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && is_supported_input(entry.path()) {
            found.push(entry.path().to_path_buf());
        }
    }

    found.sort();
    Ok(found)
}
