//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Each batch item leads with its progress position and source name; the
//! derived output name follows after an arrow. Failures keep the same
//! header line and push the reason to an indented `Error:` context line,
//! so a scan down the left edge always reads as the input list.
//!
//! # Output Format
//!
//! ```text
//! Processing 4 images
//! [1/4] wine1.jpg → wine1_no_bg.png
//! [2/4] wine2.png → wine2_no_bg.png
//! [3/4] broken.png
//!     Error: could not decode input: ...
//! [4/4] wine3.jpeg → wine3_no_bg.png
//!
//! Removed backgrounds from 3 of 4 images → no-bg
//! Archive → no-bg/images_no_background.zip
//! ```
//!
//! # Architecture
//!
//! Each concern has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::batch::{BatchEvent, BatchReport};
use crate::naming;
use std::path::Path;

/// Format a progress marker, right-aligning the count to the total's width
/// so markers line up down a batch: `[ 3/12]`.
fn progress_marker(finished: usize, total: usize) -> String {
    let width = total.to_string().len();
    format!("[{finished:>width$}/{total}]")
}

fn count_noun(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Format a single batch progress event as display lines.
pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::BatchStarted { total } => {
            vec![format!("Processing {}", count_noun(*total, "image", "images"))]
        }
        BatchEvent::ItemFinished {
            finished,
            total,
            name,
            error,
        } => {
            let marker = progress_marker(*finished, *total);
            match error {
                None => vec![format!(
                    "{} {} \u{2192} {}",
                    marker,
                    name,
                    naming::output_name(name)
                )],
                Some(reason) => vec![
                    format!("{marker} {name}"),
                    format!("    Error: {reason}"),
                ],
            }
        }
    }
}

/// Print a batch progress event to stdout.
pub fn print_batch_event(event: &BatchEvent) {
    for line in format_batch_event(event) {
        println!("{}", line);
    }
}

/// Format the end-of-run summary.
///
/// `archive_path` is the written archive, present only when one was
/// produced (more than one success).
pub fn format_batch_summary(
    report: &BatchReport,
    output_dir: &Path,
    archive_path: Option<&Path>,
) -> Vec<String> {
    let mut lines = vec![format!(
        "Removed backgrounds from {} of {} \u{2192} {}",
        report.succeeded,
        count_noun(report.total, "image", "images"),
        output_dir.display()
    )];

    if report.failed > 0 {
        lines.push(format!(
            "{} failed; see per-image errors above",
            report.failed
        ));
    }

    if let Some(path) = archive_path {
        lines.push(format!("Archive \u{2192} {}", path.display()));
    }

    lines
}

/// Print the end-of-run summary to stdout.
pub fn print_batch_summary(report: &BatchReport, output_dir: &Path, archive_path: Option<&Path>) {
    for line in format_batch_summary(report, output_dir, archive_path) {
        println!("{}", line);
    }
}
