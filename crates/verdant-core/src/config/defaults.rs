//! Default analysis parameter values and their validation/sanitization.

use serde::Deserialize;

use crate::models::{AnalysisOptions, RoiMode, RoiSpec};

/// Default analysis parameter values.
///
/// The thresholding and ROI constants encode tray geometry and expected
/// plant size assumptions, so every one of them can be overridden from the
/// config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    /// Binary threshold on the HSV value channel (dark-object polarity)
    pub threshold: u8,

    /// Mask value written for foreground pixels
    pub max_value: u8,

    /// Connected components smaller than this are removed before detection
    pub fill_min_size: u32,

    /// ROI width in pixels, centered in the crop
    pub roi_width: u32,

    /// ROI height in pixels, centered in the crop
    pub roi_height: u32,

    /// How objects are filtered against the ROI
    pub roi_mode: RoiMode,

    /// Longest edge of the displayed image in the GUI
    pub display_max_dimension: u32,

    /// Drags shorter than this many display pixels are ignored
    pub min_selection_px: f32,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            threshold: 95,
            max_value: 255,
            fill_min_size: 4000,
            roi_width: 100,
            roi_height: 100,
            roi_mode: RoiMode::Partial,
            display_max_dimension: 1400,
            min_selection_px: 10.0,
        }
    }
}

impl AnalysisDefaults {
    pub(crate) fn sanitize(&mut self) {
        self.max_value = self.max_value.max(1);
        self.roi_width = self.roi_width.max(1);
        self.roi_height = self.roi_height.max(1);
        self.display_max_dimension = self.display_max_dimension.clamp(256, 8192);
        self.min_selection_px = self.min_selection_px.clamp(1.0, 100.0);
    }

    /// Build pipeline options from the configured defaults
    pub fn to_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            threshold: self.threshold,
            max_value: self.max_value,
            fill_min_size: self.fill_min_size,
            roi: RoiSpec {
                width: self.roi_width,
                height: self.roi_height,
                mode: self.roi_mode,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let defaults = AnalysisDefaults::default();

        assert_eq!(defaults.threshold, 95);
        assert_eq!(defaults.max_value, 255);
        assert_eq!(defaults.fill_min_size, 4000);
        assert_eq!(defaults.roi_width, 100);
        assert_eq!(defaults.roi_height, 100);
        assert_eq!(defaults.roi_mode, RoiMode::Partial);
    }

    #[test]
    fn test_sanitize_clamps_out_of_range_values() {
        let mut defaults = AnalysisDefaults {
            max_value: 0,
            roi_width: 0,
            roi_height: 0,
            display_max_dimension: 50,
            min_selection_px: 0.0,
            ..AnalysisDefaults::default()
        };

        defaults.sanitize();

        assert_eq!(defaults.max_value, 1);
        assert_eq!(defaults.roi_width, 1);
        assert_eq!(defaults.roi_height, 1);
        assert_eq!(defaults.display_max_dimension, 256);
        assert_eq!(defaults.min_selection_px, 1.0);
    }

    #[test]
    fn test_to_options_carries_all_fields() {
        let defaults = AnalysisDefaults {
            threshold: 80,
            fill_min_size: 500,
            roi_width: 60,
            roi_height: 40,
            roi_mode: RoiMode::Cutto,
            ..AnalysisDefaults::default()
        };

        let options = defaults.to_options();

        assert_eq!(options.threshold, 80);
        assert_eq!(options.fill_min_size, 500);
        assert_eq!(options.roi.width, 60);
        assert_eq!(options.roi.height, 40);
        assert_eq!(options.roi.mode, RoiMode::Cutto);
    }
}
