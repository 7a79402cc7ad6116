//! Mask construction: value-channel extraction, thresholding, small-region
//! removal, and white-background masking.

use std::collections::HashMap;

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::region_labelling::{connected_components, Connectivity};
use palette::{FromColor, Hsv, Srgb};

/// Extract the HSV value channel of an RGB image as a grayscale image
pub fn value_channel(rgb: &RgbImage) -> GrayImage {
    let mut out = GrayImage::new(rgb.width(), rgb.height());

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let srgb = Srgb::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        );
        let hsv = Hsv::from_color(srgb);
        out.put_pixel(x, y, Luma([(hsv.value * 255.0).round() as u8]));
    }

    out
}

/// Binary threshold with dark-object polarity
///
/// Pixels at or below `thresh` become foreground (`max_value`); brighter
/// pixels become background (0). Plants read darker than the tray surface
/// on the value channel, hence the inverted polarity.
pub fn threshold_dark(gray: &GrayImage, thresh: u8, max_value: u8) -> GrayImage {
    let mut mask = threshold(gray, thresh, ThresholdType::BinaryInverted);

    if max_value != 255 {
        for pixel in mask.pixels_mut() {
            if pixel[0] != 0 {
                pixel[0] = max_value;
            }
        }
    }

    mask
}

/// Remove connected components smaller than `min_size` pixels from a binary
/// mask
///
/// Specks below the size floor are noise (soil, plug shadows), not plants.
/// A floor of 0 or 1 leaves the mask untouched.
pub fn fill_small_regions(mask: &GrayImage, min_size: u32) -> GrayImage {
    if min_size <= 1 {
        return mask.clone();
    }

    let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));

    let mut areas: HashMap<u32, u32> = HashMap::new();
    for label in labels.pixels() {
        if label[0] != 0 {
            *areas.entry(label[0]).or_insert(0) += 1;
        }
    }

    let mut out = mask.clone();
    for (x, y, label) in labels.enumerate_pixels() {
        if label[0] != 0 && areas[&label[0]] < min_size {
            out.put_pixel(x, y, Luma([0]));
        }
    }

    out
}

/// Apply a binary mask to an RGB image, painting background pixels white
pub fn apply_mask(rgb: &RgbImage, mask: &GrayImage) -> Result<RgbImage, String> {
    if rgb.dimensions() != mask.dimensions() {
        return Err(format!(
            "Mask dimensions {:?} do not match image dimensions {:?}",
            mask.dimensions(),
            rgb.dimensions()
        ));
    }

    let mut out = rgb.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if mask.get_pixel(x, y)[0] == 0 {
            *pixel = Rgb([255, 255, 255]);
        }
    }

    Ok(out)
}
