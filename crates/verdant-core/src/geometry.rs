//! Selection geometry and display-to-source coordinate mapping.
//!
//! The GUI shows a resized copy of the source image, so a drag gesture
//! produces coordinates in display space. Rescaling back to source space is
//! linear: each axis is multiplied by `source_dim / display_dim`.

use serde::Serialize;

/// Linear mapping between display coordinates and source image coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMapping {
    /// Source image dimensions (width, height)
    pub source: (u32, u32),

    /// Displayed image dimensions (width, height)
    pub display: (u32, u32),
}

impl DisplayMapping {
    pub fn new(source: (u32, u32), display: (u32, u32)) -> Result<Self, String> {
        if source.0 == 0 || source.1 == 0 {
            return Err(format!(
                "Source dimensions must be non-zero, got {}x{}",
                source.0, source.1
            ));
        }
        if display.0 == 0 || display.1 == 0 {
            return Err(format!(
                "Display dimensions must be non-zero, got {}x{}",
                display.0, display.1
            ));
        }
        Ok(Self { source, display })
    }

    /// Horizontal scale factor (source pixels per display pixel)
    pub fn scale_x(&self) -> f32 {
        self.source.0 as f32 / self.display.0 as f32
    }

    /// Vertical scale factor (source pixels per display pixel)
    pub fn scale_y(&self) -> f32 {
        self.source.1 as f32 / self.display.1 as f32
    }

    /// Map a display-space point to source-space coordinates
    pub fn to_source(&self, point: (f32, f32)) -> (f32, f32) {
        (point.0 * self.scale_x(), point.1 * self.scale_y())
    }

    /// Map a display-space drag gesture to a source-space crop rectangle,
    /// ordered and clamped to the source bounds
    pub fn map_selection(&self, start: (f32, f32), end: (f32, f32)) -> SelectionRect {
        let rect = SelectionRect::from_points(self.to_source(start), self.to_source(end));
        rect.clamp_to(self.source.0, self.source.1)
    }
}

/// An axis-aligned rectangle in image pixel coordinates
///
/// Construction normalizes the two corner points so that the stored origin
/// is the top-left corner and width/height are non-negative; the original
/// drag direction does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionRect {
    /// Left edge
    pub x: u32,

    /// Top edge
    pub y: u32,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl SelectionRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from two corner points in any order
    ///
    /// Coordinates are ordered so start <= end on both axes, floored to
    /// whole pixels, and negative positions are clamped to zero.
    pub fn from_points(a: (f32, f32), b: (f32, f32)) -> Self {
        let x1 = a.0.min(b.0).max(0.0).floor() as u32;
        let y1 = a.1.min(b.1).max(0.0).floor() as u32;
        let x2 = a.0.max(b.0).max(0.0).floor() as u32;
        let y2 = a.1.max(b.1).max(0.0).floor() as u32;

        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Clamp the rectangle to an image of the given dimensions
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Self {
        let x = self.x.min(image_width);
        let y = self.y.min(image_height);
        let width = self.width.min(image_width - x);
        let height = self.height.min(image_height - y);

        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of the given size centered inside `self`, in the same
    /// coordinate space. Larger sizes are clamped to `self`'s bounds.
    pub fn centered_within(&self, width: u32, height: u32) -> Self {
        let w = width.min(self.width);
        let h = height.min(self.height);
        Self {
            x: self.x + (self.width - w) / 2,
            y: self.y + (self.height - h) / 2,
            width: w,
            height: h,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the point (x, y) lies inside the rectangle
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescaling_is_linear() {
        let mapping = DisplayMapping::new((1200, 900), (400, 300)).unwrap();

        assert_eq!(mapping.scale_x(), 3.0);
        assert_eq!(mapping.scale_y(), 3.0);

        let (sx, sy) = (mapping.scale_x(), mapping.scale_y());
        for point in [(0.0, 0.0), (10.0, 20.0), (399.0, 299.0)] {
            let mapped = mapping.to_source(point);
            assert_eq!(mapped, (point.0 * sx, point.1 * sy));
        }
    }

    #[test]
    fn test_crop_dimensions_match_point_distance() {
        // Crop width/height handed downstream must equal |x2-x1| and |y2-y1|
        let rect = SelectionRect::from_points((30.0, 70.0), (130.0, 20.0));

        assert_eq!(rect.x, 30);
        assert_eq!(rect.y, 20);
        assert_eq!(rect.width, 100);
        assert_eq!(rect.height, 50);
    }

    #[test]
    fn test_drag_direction_does_not_matter() {
        let a = SelectionRect::from_points((10.0, 10.0), (50.0, 40.0));
        let b = SelectionRect::from_points((50.0, 40.0), (10.0, 10.0));
        let c = SelectionRect::from_points((50.0, 10.0), (10.0, 40.0));

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_end_to_end_display_to_source_mapping() {
        // 1200x800 source shown at 600x400 (scale 2.0, 2.0): a drag from
        // display (100,100) to (300,250) crops the source at (200,200) with
        // width 400 and height 300.
        let mapping = DisplayMapping::new((1200, 800), (600, 400)).unwrap();
        let rect = mapping.map_selection((100.0, 100.0), (300.0, 250.0));

        assert_eq!(rect, SelectionRect::new(200, 200, 400, 300));
    }

    #[test]
    fn test_clamp_to_bounds() {
        let rect = SelectionRect::new(90, 50, 100, 100).clamp_to(120, 80);

        assert_eq!(rect.x, 90);
        assert_eq!(rect.y, 50);
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 30);
    }

    #[test]
    fn test_clamp_fully_outside_is_empty() {
        let rect = SelectionRect::new(200, 300, 10, 10).clamp_to(100, 100);

        assert!(rect.is_empty());
    }

    #[test]
    fn test_negative_coordinates_clamp_to_zero() {
        let rect = SelectionRect::from_points((-20.0, -10.0), (30.0, 40.0));

        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 0);
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 40);
    }

    #[test]
    fn test_centered_within() {
        let crop = SelectionRect::new(0, 0, 400, 300);
        let roi = crop.centered_within(100, 100);

        assert_eq!(roi, SelectionRect::new(150, 100, 100, 100));
    }

    #[test]
    fn test_centered_within_larger_than_crop() {
        // An oversized ROI collapses to the whole crop rather than erroring
        let crop = SelectionRect::new(10, 20, 80, 60);
        let roi = crop.centered_within(100, 100);

        assert_eq!(roi, crop);
    }

    #[test]
    fn test_mapping_rejects_zero_dimensions() {
        assert!(DisplayMapping::new((0, 100), (50, 50)).is_err());
        assert!(DisplayMapping::new((100, 100), (50, 0)).is_err());
    }

    #[test]
    fn test_contains() {
        let rect = SelectionRect::new(10, 10, 5, 5);

        assert!(rect.contains(10, 10));
        assert!(rect.contains(14, 14));
        assert!(!rect.contains(15, 14));
        assert!(!rect.contains(9, 10));
    }
}
