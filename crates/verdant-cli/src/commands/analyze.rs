//! Analyze a single image.

use std::path::{Path, PathBuf};

use verdant_core::exporters::append_csv;
use verdant_core::geometry::SelectionRect;
use verdant_core::models::AnalysisOptions;

use verdant_cli::processing::analyze_one;

/// Analyze one region of one image and report the pixel area.
#[allow(clippy::too_many_arguments)]
pub fn cmd_analyze(
    input: &Path,
    region: Option<SelectionRect>,
    display_size: Option<(u32, u32)>,
    options: &AnalysisOptions,
    csv: Option<&PathBuf>,
    save_masked: Option<&PathBuf>,
    json: bool,
) -> Result<(), String> {
    let (record, analyzed) = analyze_one(input, region, display_size, options)?;

    if let Some(path) = save_masked {
        analyzed
            .masked
            .save(path)
            .map_err(|e| format!("Failed to save masked crop: {}", e))?;
    }

    if let Some(path) = csv {
        append_csv(path, &record)?;
    }

    if json {
        let rendered = serde_json::to_string_pretty(&record)
            .map_err(|e| format!("Failed to serialize result: {}", e))?;
        println!("{}", rendered);
    } else {
        let report = &record.report;
        println!(
            "{}: pixel area {} ({} of {} objects kept in {}x{} ROI)",
            input.display(),
            report.pixel_area,
            report.objects_kept,
            report.objects_detected,
            report.roi.width,
            report.roi.height,
        );
    }

    Ok(())
}
