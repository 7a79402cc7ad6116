//! Display helpers: texture construction and fit-to-panel scaling.

use eframe::egui;
use image::RgbImage;

use verdant_core::decoders::DecodedImage;

/// Build an egui color image from decoded RGB8 data
pub fn color_image_from_decoded(image: &DecodedImage) -> egui::ColorImage {
    egui::ColorImage::from_rgb(
        [image.width as usize, image.height as usize],
        &image.data,
    )
}

/// Build an egui color image from an `image::RgbImage`
pub fn color_image_from_rgb(image: &RgbImage) -> egui::ColorImage {
    egui::ColorImage::from_rgb(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    )
}

/// Downsample the decoded image for display if it exceeds `max_dimension`
///
/// Coordinate mapping always runs against the on-screen size, so this only
/// bounds texture memory; the analysis still uses the full-resolution data.
pub fn display_copy(image: &DecodedImage, max_dimension: u32) -> Result<DecodedImage, String> {
    if image.width <= max_dimension && image.height <= max_dimension {
        return Ok(image.clone());
    }

    let scale = if image.width > image.height {
        max_dimension as f32 / image.width as f32
    } else {
        max_dimension as f32 / image.height as f32
    };
    let new_width = ((image.width as f32 * scale).round() as u32).max(1);
    let new_height = ((image.height as f32 * scale).round() as u32).max(1);

    let rgb = image.to_rgb_image()?;
    let resized =
        image::imageops::resize(&rgb, new_width, new_height, image::imageops::FilterType::Triangle);

    Ok(DecodedImage {
        width: new_width,
        height: new_height,
        data: resized.into_raw(),
        channels: 3,
    })
}

/// Size at which a texture should be drawn to fit the available space while
/// preserving aspect ratio, never upscaling
pub fn fit_display_size(texture_size: egui::Vec2, available: egui::Vec2) -> egui::Vec2 {
    let scale = (available.x / texture_size.x)
        .min(available.y / texture_size.y)
        .min(1.0);
    texture_size * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    use egui::vec2;

    #[test]
    fn test_fit_shrinks_to_available_space() {
        let size = fit_display_size(vec2(1200.0, 800.0), vec2(600.0, 600.0));

        assert_eq!(size, vec2(600.0, 400.0));
    }

    #[test]
    fn test_fit_never_upscales() {
        let size = fit_display_size(vec2(300.0, 200.0), vec2(1000.0, 1000.0));

        assert_eq!(size, vec2(300.0, 200.0));
    }

    #[test]
    fn test_display_copy_passthrough_when_small() {
        let image = DecodedImage {
            width: 100,
            height: 50,
            data: vec![0; 100 * 50 * 3],
            channels: 3,
        };

        let copy = display_copy(&image, 1400).unwrap();
        assert_eq!((copy.width, copy.height), (100, 50));
    }

    #[test]
    fn test_display_copy_preserves_aspect_ratio() {
        let image = DecodedImage {
            width: 4000,
            height: 2000,
            data: vec![128; 4000 * 2000 * 3],
            channels: 3,
        };

        let copy = display_copy(&image, 1000).unwrap();
        assert_eq!((copy.width, copy.height), (1000, 500));
        assert_eq!(copy.data.len(), (1000 * 500 * 3) as usize);
    }
}
