//! Green-pixel analysis pipeline
//!
//! Fixed call sequence over the cropped tray selection:
//! - `mask`: HSV value-channel extraction, dark-object binary threshold,
//!   small-region removal, white-background masking
//! - `objects`: connected-component object detection and ROI filtering
//!
//! The heavy lifting is delegated to `palette` (color conversion) and
//! `imageproc` (thresholding, component labeling); this module wires the
//! steps together and enforces the selection invariants.

mod mask;
mod objects;

#[cfg(test)]
mod tests;

pub use mask::{apply_mask, fill_small_regions, threshold_dark, value_channel};
pub use objects::{filter_by_roi, label_objects, RoiFilterOutcome};

use image::RgbImage;

use crate::decoders::DecodedImage;
use crate::geometry::SelectionRect;
use crate::models::{AnalysisOptions, AnalysisReport};

/// Result of analyzing one region: the report plus the masked crop
/// (foreground on a white background) for display or export
#[derive(Debug)]
pub struct AnalyzedRegion {
    pub report: AnalysisReport,
    pub masked: RgbImage,
}

/// Analyze a selected region of a decoded image
///
/// The rectangle is clamped to the image bounds before cropping; an empty
/// selection (zero area after clamping) is an error, not a crash.
pub fn analyze_region(
    image: &DecodedImage,
    rect: SelectionRect,
    options: &AnalysisOptions,
) -> Result<AnalyzedRegion, String> {
    let rect = rect.clamp_to(image.width, image.height);
    if rect.is_empty() {
        return Err(format!(
            "Selection is empty after clamping to {}x{} image bounds",
            image.width, image.height
        ));
    }

    let rgb = image.to_rgb_image()?;
    let crop = image::imageops::crop_imm(&rgb, rect.x, rect.y, rect.width, rect.height).to_image();

    let value = value_channel(&crop);
    let thresh = threshold_dark(&value, options.threshold, options.max_value);
    let filled = fill_small_regions(&thresh, options.fill_min_size);
    let masked = apply_mask(&crop, &filled)?;
    let labels = label_objects(&filled);

    // ROI is centered in the crop, expressed in crop-local coordinates
    let crop_local = SelectionRect::new(0, 0, rect.width, rect.height);
    let roi = crop_local.centered_within(options.roi.width, options.roi.height);

    let outcome = filter_by_roi(&labels, roi, options.roi.mode);

    Ok(AnalyzedRegion {
        report: AnalysisReport {
            crop: rect,
            roi,
            pixel_area: outcome.pixel_area,
            objects_detected: outcome.objects_detected,
            objects_kept: outcome.objects_kept,
        },
        masked,
    })
}
