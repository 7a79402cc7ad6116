//! Analysis option types for the pixel-counting pipeline.

use serde::{Deserialize, Serialize};

/// How detected objects are filtered against the region of interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoiMode {
    /// Keep any object that overlaps the ROI, counting its full area
    #[default]
    Partial,

    /// Count only object pixels that fall inside the ROI
    Cutto,
}

/// Region-of-interest specification, centered in the cropped selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiSpec {
    /// ROI width in pixels
    pub width: u32,

    /// ROI height in pixels
    pub height: u32,

    /// Object filtering mode
    pub mode: RoiMode,
}

impl Default for RoiSpec {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            mode: RoiMode::Partial,
        }
    }
}

/// Parameters for the green-pixel analysis pipeline
///
/// These encode tray geometry and expected plant size assumptions that are
/// not derived from the image itself, so they are configuration rather than
/// constants baked into the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Binary threshold on the HSV value channel. Pixels at or below this
    /// value are foreground (dark-object polarity).
    pub threshold: u8,

    /// Value written into the binary mask for foreground pixels
    pub max_value: u8,

    /// Connected components smaller than this many pixels are removed from
    /// the mask before object detection
    pub fill_min_size: u32,

    /// Region of interest used to filter detected objects
    pub roi: RoiSpec,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            threshold: 95,
            max_value: 255,
            fill_min_size: 4000,
            roi: RoiSpec::default(),
        }
    }
}
