//! Input handling and per-image processing.

use std::path::{Path, PathBuf};

use verdant_core::config::analysis_config_handle;
use verdant_core::decoders::{decode_image, is_supported_extension};
use verdant_core::geometry::{DisplayMapping, SelectionRect};
use verdant_core::models::{AnalysisOptions, AnalysisRecord, RoiMode};
use verdant_core::pipeline::{analyze_region, AnalyzedRegion};
use verdant_core::verbose_println;

/// Command-line overrides applied on top of the configured defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionOverrides {
    pub threshold: Option<u8>,
    pub fill_min_size: Option<u32>,
    pub roi_size: Option<(u32, u32)>,
    pub roi_mode: Option<RoiMode>,
}

/// Build pipeline options from the loaded config plus CLI overrides
pub fn build_options(overrides: &OptionOverrides) -> AnalysisOptions {
    let mut options = analysis_config_handle().config.defaults.to_options();

    if let Some(threshold) = overrides.threshold {
        options.threshold = threshold;
    }
    if let Some(fill_min_size) = overrides.fill_min_size {
        options.fill_min_size = fill_min_size;
    }
    if let Some((width, height)) = overrides.roi_size {
        options.roi.width = width.max(1);
        options.roi.height = height.max(1);
    }
    if let Some(mode) = overrides.roi_mode {
        options.roi.mode = mode;
    }

    options
}

/// Analyze one image file
///
/// `region` is in source coordinates; when `display_size` is given the
/// region is interpreted in display coordinates and rescaled the same way
/// the GUI rescales a drag gesture. A missing region analyzes the whole
/// image.
pub fn analyze_one(
    input: &Path,
    region: Option<SelectionRect>,
    display_size: Option<(u32, u32)>,
    options: &AnalysisOptions,
) -> Result<(AnalysisRecord, AnalyzedRegion), String> {
    let image = decode_image(input)?;

    let rect = match (region, display_size) {
        (Some(rect), Some(display)) => {
            let mapping = DisplayMapping::new((image.width, image.height), display)?;
            let start = (rect.x as f32, rect.y as f32);
            let end = (rect.right() as f32, rect.bottom() as f32);
            mapping.map_selection(start, end)
        }
        (Some(rect), None) => rect,
        (None, _) => SelectionRect::new(0, 0, image.width, image.height),
    };

    verbose_println!(
        "[verdant] {}: analyzing region {},{} {}x{}",
        input.display(),
        rect.x,
        rect.y,
        rect.width,
        rect.height
    );

    let analyzed = analyze_region(&image, rect, options)?;
    let record = AnalysisRecord::new(input.to_path_buf(), *options, analyzed.report.clone());

    Ok((record, analyzed))
}

/// Expand a directory into a sorted list of supported image files
pub fn expand_inputs(dir: &Path) -> Result<Vec<PathBuf>, String> {
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()));
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(is_supported_extension);
        if supported {
            files.push(path);
        }
    }

    // Sort for consistent ordering
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn test_expand_inputs_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.jpg", "a.png", "notes.txt", "c.JPG"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.jpg")).unwrap();

        let files = expand_inputs(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.png", "b.jpg", "c.JPG"]);
    }

    #[test]
    fn test_expand_inputs_rejects_missing_dir() {
        let result = expand_inputs(Path::new("/nonexistent/trays"));

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Not a directory"));
    }

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let overrides = OptionOverrides {
            threshold: Some(70),
            roi_size: Some((50, 60)),
            ..OptionOverrides::default()
        };

        let options = build_options(&overrides);

        assert_eq!(options.threshold, 70);
        assert_eq!(options.roi.width, 50);
        assert_eq!(options.roi.height, 60);
        // Untouched fields keep their configured defaults
        assert_eq!(options.max_value, 255);
    }
}
