//! Object detection and region-of-interest filtering.

use std::collections::BTreeMap;

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};

use crate::geometry::SelectionRect;
use crate::models::RoiMode;

/// Label image produced by connected-component analysis
pub type LabelImage = ImageBuffer<Luma<u32>, Vec<u32>>;

/// Detect objects in a binary mask via 8-connected component labeling
pub fn label_objects(mask: &GrayImage) -> LabelImage {
    connected_components(mask, Connectivity::Eight, Luma([0u8]))
}

/// Outcome of filtering labeled objects against a region of interest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoiFilterOutcome {
    /// Summed pixel area of the kept objects
    pub pixel_area: u64,

    /// Number of distinct objects in the label image
    pub objects_detected: u32,

    /// Number of objects that passed the ROI filter
    pub objects_kept: u32,
}

/// Per-object accumulation used while scanning the label image
#[derive(Default, Clone, Copy)]
struct ObjectAccum {
    area: u64,
    roi_area: u64,
}

/// Filter labeled objects against a region of interest
///
/// `Partial` keeps every object that overlaps the ROI and counts its full
/// area; `Cutto` counts only the object pixels that fall inside the ROI.
/// The ROI rectangle is in the same (crop-local) coordinate space as the
/// label image.
pub fn filter_by_roi(labels: &LabelImage, roi: SelectionRect, mode: RoiMode) -> RoiFilterOutcome {
    let mut objects: BTreeMap<u32, ObjectAccum> = BTreeMap::new();

    for (x, y, label) in labels.enumerate_pixels() {
        if label[0] == 0 {
            continue;
        }
        let entry = objects.entry(label[0]).or_default();
        entry.area += 1;
        if roi.contains(x, y) {
            entry.roi_area += 1;
        }
    }

    let objects_detected = objects.len() as u32;
    let mut objects_kept = 0u32;
    let mut pixel_area = 0u64;

    for accum in objects.values() {
        if accum.roi_area == 0 {
            continue;
        }
        objects_kept += 1;
        pixel_area += match mode {
            RoiMode::Partial => accum.area,
            RoiMode::Cutto => accum.roi_area,
        };
    }

    RoiFilterOutcome {
        pixel_area,
        objects_detected,
        objects_kept,
    }
}
