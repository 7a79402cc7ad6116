//! Analysis result types.

use std::path::PathBuf;

use serde::Serialize;

use crate::geometry::SelectionRect;
use crate::models::AnalysisOptions;

/// Result of analyzing one selected region
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// The crop rectangle that was analyzed, in source image coordinates
    pub crop: SelectionRect,

    /// The region of interest inside the crop, in crop-local coordinates
    pub roi: SelectionRect,

    /// Total pixel area of the objects kept by the ROI filter
    pub pixel_area: u64,

    /// Number of objects detected in the crop after small-region removal
    pub objects_detected: u32,

    /// Number of objects kept by the ROI filter
    pub objects_kept: u32,
}

/// One row of CSV output: a report tied to its source image and options
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    /// Image the selection was taken from
    pub image: PathBuf,

    /// Options the pipeline ran with
    pub options: AnalysisOptions,

    /// The analysis result
    pub report: AnalysisReport,
}

impl AnalysisRecord {
    pub fn new(image: PathBuf, options: AnalysisOptions, report: AnalysisReport) -> Self {
        Self {
            image,
            options,
            report,
        }
    }
}
