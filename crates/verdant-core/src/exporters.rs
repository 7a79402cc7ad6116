//! Result exporters
//!
//! Export analysis results as CSV rows, one row per analyzed selection.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::{AnalysisRecord, RoiMode};

/// Column layout shared by `export_csv` and `append_csv`
pub const CSV_HEADER: &str =
    "image,x,y,width,height,threshold,fill_min_size,roi_width,roi_height,roi_mode,\
     pixel_area,objects_detected,objects_kept";

/// Write a set of analysis records to a CSV file, replacing any existing file
pub fn export_csv<P: AsRef<Path>>(path: P, records: &[AnalysisRecord]) -> Result<(), String> {
    let file =
        File::create(path.as_ref()).map_err(|e| format!("Failed to create CSV file: {}", e))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", CSV_HEADER).map_err(|e| format!("Failed to write CSV header: {}", e))?;
    for record in records {
        writeln!(writer, "{}", format_row(record))
            .map_err(|e| format!("Failed to write CSV row: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush CSV file: {}", e))
}

/// Append a single analysis record to a CSV file
///
/// The header is written only when the file does not exist yet, so repeated
/// analyses of one session accumulate in a single table.
pub fn append_csv<P: AsRef<Path>>(path: P, record: &AnalysisRecord) -> Result<(), String> {
    let path = path.as_ref();
    let needs_header = !path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open CSV file: {}", e))?;
    let mut writer = BufWriter::new(file);

    if needs_header {
        writeln!(writer, "{}", CSV_HEADER)
            .map_err(|e| format!("Failed to write CSV header: {}", e))?;
    }
    writeln!(writer, "{}", format_row(record))
        .map_err(|e| format!("Failed to write CSV row: {}", e))?;

    writer
        .flush()
        .map_err(|e| format!("Failed to flush CSV file: {}", e))
}

fn format_row(record: &AnalysisRecord) -> String {
    let crop = &record.report.crop;
    let roi = &record.options.roi;
    let mode = match roi.mode {
        RoiMode::Partial => "partial",
        RoiMode::Cutto => "cutto",
    };

    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{}",
        escape_field(&record.image.display().to_string()),
        crop.x,
        crop.y,
        crop.width,
        crop.height,
        record.options.threshold,
        record.options.fill_min_size,
        roi.width,
        roi.height,
        mode,
        record.report.pixel_area,
        record.report.objects_detected,
        record.report.objects_kept,
    )
}

/// Quote a field if it contains CSV metacharacters
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
