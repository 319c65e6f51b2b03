use clap::Parser;
use cutout::{archive, batch, imaging, inputs, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "cutout")]
#[command(about = "Remove image backgrounds in batch, crop to content, zip the results")]
#[command(long_about = "\
Remove image backgrounds in batch, crop to content, zip the results

Each input image is decoded, its background removed, and the result
cropped to the smallest box holding every visible pixel. Cutouts land in
the output directory as <base>_no_bg.png. When a run produces more than
one cutout, the directory also gets images_no_background.zip bundling
them all.

Inputs:

  cutout shots/                  # every .png/.jpg/.jpeg under shots/, sorted
  cutout wine1.jpg wine2.png     # explicit files, taken as given
  cutout shots/ extra.png -o out # mix freely; argument order is kept

The built-in segmenter targets product shots on a uniform backdrop: it
estimates the backdrop color from the image border and keys matching
pixels transparent. --threshold sets how far a pixel may drift from that
color (per channel, 0-255) and still count as backdrop.

A file that fails to decode or segment is reported and skipped; the rest
of the batch still completes. The exit status is nonzero only when every
input failed.")]
#[command(version = version_string())]
struct Cli {
    /// Image files or directories to process (directories are walked recursively)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for cutouts and the archive
    #[arg(short, long, default_value = "no-bg")]
    output: PathBuf,

    /// Color-key tolerance: max per-channel distance from the backdrop color
    #[arg(long, default_value_t = imaging::DEFAULT_TOLERANCE)]
    threshold: u8,

    /// Worker threads (0 = one per core)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Suppress progress lines and print a JSON report instead
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let files = inputs::collect_inputs(&cli.inputs)?;
    if files.is_empty() {
        println!("No images found");
        return Ok(());
    }

    let mut items = Vec::with_capacity(files.len());
    for file in &files {
        let item = batch::RawItem::from_file(file)
            .map_err(|e| format!("could not read {}: {e}", file.display()))?;
        items.push(item);
    }

    init_thread_pool(cli.threads);
    let segmenter = imaging::ColorKeySegmenter::new(cli.threshold);

    let result = if cli.json {
        batch::process_batch_with_segmenter(&segmenter, items, None)
    } else {
        let (tx, rx) = std::sync::mpsc::channel();
        let printer = std::thread::spawn(move || {
            for event in rx {
                output::print_batch_event(&event);
            }
        });
        let result = batch::process_batch_with_segmenter(&segmenter, items, Some(tx));
        printer.join().unwrap();
        result
    };

    std::fs::create_dir_all(&cli.output)?;
    for item in result.items() {
        if let Ok(image) = &item.outcome {
            let png = imaging::codec::encode_rgba_png(image)?;
            std::fs::write(cli.output.join(item.output_name()), png)?;
        }
    }

    let archive_path = if result.succeeded() > 1 {
        let bytes = archive::build_archive(result.successes())?;
        let path = cli.output.join(archive::ARCHIVE_FILE_NAME);
        std::fs::write(&path, bytes)?;
        Some(path)
    } else {
        None
    };

    let report = result.report();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        output::print_batch_summary(&report, &cli.output, archive_path.as_deref());
    }

    if result.succeeded() == 0 {
        return Err(format!("all {} images failed", result.len()).into());
    }

    Ok(())
}

/// Initialize the rayon thread pool from the --threads flag.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(requested: usize) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = if requested == 0 {
        cores
    } else {
        requested.min(cores)
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
