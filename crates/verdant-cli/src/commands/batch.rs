//! Batch-analyze a directory of tray images.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;

use verdant_core::exporters::export_csv;
use verdant_core::geometry::SelectionRect;
use verdant_core::models::{AnalysisOptions, AnalysisRecord};

use verdant_cli::processing::{analyze_one, expand_inputs};

/// Analyze every supported image in a directory with the same region and
/// options, writing one CSV table of results.
pub fn cmd_batch(
    dir: &Path,
    region: Option<SelectionRect>,
    display_size: Option<(u32, u32)>,
    options: &AnalysisOptions,
    csv: &PathBuf,
) -> Result<(), String> {
    let files = expand_inputs(dir)?;
    if files.is_empty() {
        return Err(format!(
            "No supported images found in {}",
            dir.display()
        ));
    }

    println!("Analyzing {} images in {}", files.len(), dir.display());

    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let records: Mutex<Vec<AnalysisRecord>> = Mutex::new(Vec::with_capacity(files.len()));

    files.par_iter().for_each(|file| {
        match analyze_one(file, region, display_size, options) {
            Ok((record, _)) => {
                println!(
                    "  {}: pixel area {}",
                    file.display(),
                    record.report.pixel_area
                );
                records.lock().unwrap().push(record);
                succeeded.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                eprintln!("  {}: {}", file.display(), e);
                failed.fetch_add(1, Ordering::SeqCst);
            }
        }
    });

    // Parallel completion order is nondeterministic; sort rows by path so
    // repeated runs produce identical files
    let mut records = records.into_inner().unwrap();
    records.sort_by(|a, b| a.image.cmp(&b.image));
    export_csv(csv, &records)?;

    println!(
        "Done: {} succeeded, {} failed, results in {}",
        succeeded.load(Ordering::SeqCst),
        failed.load(Ordering::SeqCst),
        csv.display()
    );

    Ok(())
}
