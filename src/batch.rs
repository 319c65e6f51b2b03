//! Batch background removal.
//!
//! The core pipeline stage: takes named byte payloads and runs each through
//! the same per-image sequence.
//!
//! ```text
//! bytes ──decode──▶ bitmap ──segment──▶ cutout ──crop──▶ RgbaImage
//! ```
//!
//! ## Failure Isolation
//!
//! One bad input never aborts the batch. Each item carries its own
//! `Result`: a corrupt file yields [`ItemError::Decode`] for that item,
//! a segmenter refusal yields [`ItemError::Segmentation`], and every other
//! item still completes. The batch-level return is therefore infallible.
//!
//! ## Ordering
//!
//! Items are processed in parallel using [rayon](https://docs.rs/rayon),
//! but results always come back in input order regardless of which worker
//! finished first.
//!
//! ## Progress
//!
//! Callers may pass an optional channel sender. The batch emits
//! [`BatchEvent::BatchStarted`] once, then one
//! [`BatchEvent::ItemFinished`] per item with a strictly increasing
//! `finished` count. The channel is advisory: a dropped receiver is
//! ignored and never fails the batch.

use crate::imaging::segmenter::SegmentationError;
use crate::imaging::{ColorKeySegmenter, Segmenter, codec, remove_background};
use crate::naming;
use image::RgbaImage;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Why a single item failed. The rest of the batch is unaffected.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("could not decode input: {0}")]
    Decode(#[source] image::ImageError),
    #[error(transparent)]
    Segmentation(#[from] SegmentationError),
}

/// One input to the batch: a display name plus the raw file bytes.
///
/// The name is carried verbatim through processing and drives output
/// naming; it does not need to correspond to a real path.
#[derive(Debug, Clone)]
pub struct RawItem {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawItem {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read an item from disk, using the file name as the item name.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }
}

/// One per-item outcome, in input order.
#[derive(Debug)]
pub struct ProcessedItem {
    pub source_name: String,
    pub outcome: Result<RgbaImage, ItemError>,
}

impl ProcessedItem {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The output file name this item maps to (`<base>_no_bg.png`).
    pub fn output_name(&self) -> String {
        naming::output_name(&self.source_name)
    }
}

/// All per-item outcomes of a batch, in input order.
#[derive(Debug)]
pub struct BatchResult {
    items: Vec<ProcessedItem>,
}

impl BatchResult {
    pub fn items(&self) -> &[ProcessedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// Successful items as `(source name, cutout)` pairs, in input order.
    pub fn successes(&self) -> impl Iterator<Item = (&str, &RgbaImage)> {
        self.items.iter().filter_map(|item| {
            item.outcome
                .as_ref()
                .ok()
                .map(|image| (item.source_name.as_str(), image))
        })
    }

    /// Summarize the batch for reporting (text or JSON).
    pub fn report(&self) -> BatchReport {
        let items = self
            .items
            .iter()
            .map(|item| match &item.outcome {
                Ok(image) => ItemReport {
                    source: item.source_name.clone(),
                    status: ItemStatus::Ok,
                    output: Some(item.output_name()),
                    width: Some(image.width()),
                    height: Some(image.height()),
                    error: None,
                },
                Err(error) => ItemReport {
                    source: item.source_name.clone(),
                    status: ItemStatus::Failed,
                    output: None,
                    width: None,
                    height: None,
                    error: Some(error.to_string()),
                },
            })
            .collect();

        BatchReport {
            total: self.len(),
            succeeded: self.succeeded(),
            failed: self.failed(),
            items,
        }
    }
}

/// Progress events emitted while a batch runs.
///
/// `finished` is strictly increasing across events of one batch; the last
/// `ItemFinished` always carries `finished == total`.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    BatchStarted {
        total: usize,
    },
    ItemFinished {
        finished: usize,
        total: usize,
        name: String,
        /// Present when the item failed; the display form of its error.
        error: Option<String>,
    },
}

/// Machine-readable batch summary.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<ItemReport>,
}

#[derive(Debug, Serialize)]
pub struct ItemReport {
    pub source: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Cutout dimensions, present for succeeded items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Ok,
    Failed,
}

/// Process a batch with the built-in color-key segmenter at its default
/// tolerance.
pub fn process_batch(items: Vec<RawItem>, progress: Option<Sender<BatchEvent>>) -> BatchResult {
    let segmenter = ColorKeySegmenter::default();
    process_batch_with_segmenter(&segmenter, items, progress)
}

/// Process a batch using a specific segmenter (allows testing with mock).
pub fn process_batch_with_segmenter(
    segmenter: &impl Segmenter,
    items: Vec<RawItem>,
    progress: Option<Sender<BatchEvent>>,
) -> BatchResult {
    let total = items.len();
    send_event(&progress, BatchEvent::BatchStarted { total });

    // Counter and send share one lock so `finished` values leave the
    // channel in increasing order even when workers race.
    let finished = Mutex::new(0usize);

    let items: Vec<ProcessedItem> = items
        .into_par_iter()
        .map(|item| {
            let outcome = run_item(segmenter, &item.bytes);

            if let Ok(mut done) = finished.lock() {
                *done += 1;
                send_event(
                    &progress,
                    BatchEvent::ItemFinished {
                        finished: *done,
                        total,
                        name: item.name.clone(),
                        error: outcome.as_ref().err().map(|e| e.to_string()),
                    },
                );
            }

            ProcessedItem {
                source_name: item.name,
                outcome,
            }
        })
        .collect();

    BatchResult { items }
}

fn run_item(segmenter: &impl Segmenter, bytes: &[u8]) -> Result<RgbaImage, ItemError> {
    let image = codec::decode(bytes).map_err(ItemError::Decode)?;
    Ok(remove_background(segmenter, &image)?)
}

fn send_event(progress: &Option<Sender<BatchEvent>>, event: BatchEvent) {
    if let Some(tx) = progress {
        // Advisory channel: a hung-up receiver is not an error.
        let _ = tx.send(event);
    }
}
