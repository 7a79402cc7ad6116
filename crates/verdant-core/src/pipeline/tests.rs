//! Tests for the analysis pipeline
//!
//! All tests run on synthetic tray images: a bright (white) background with
//! dark painted squares standing in for plants.

use super::*;

use image::{Rgb, RgbImage};

use crate::decoders::DecodedImage;
use crate::geometry::SelectionRect;
use crate::models::{AnalysisOptions, RoiMode, RoiSpec};

/// Dark green "plant" color: HSV value 80, below the default threshold
const PLANT: Rgb<u8> = Rgb([30, 80, 30]);

fn tray_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
}

fn paint_square(img: &mut RgbImage, x: u32, y: u32, size: u32, color: Rgb<u8>) {
    for dy in 0..size {
        for dx in 0..size {
            img.put_pixel(x + dx, y + dy, color);
        }
    }
}

fn decoded(img: &RgbImage) -> DecodedImage {
    DecodedImage {
        width: img.width(),
        height: img.height(),
        data: img.as_raw().clone(),
        channels: 3,
    }
}

fn options(fill_min_size: u32, mode: RoiMode) -> AnalysisOptions {
    AnalysisOptions {
        threshold: 95,
        max_value: 255,
        fill_min_size,
        roi: RoiSpec {
            width: 100,
            height: 100,
            mode,
        },
    }
}

fn full_rect(img: &RgbImage) -> SelectionRect {
    SelectionRect::new(0, 0, img.width(), img.height())
}

// ========================================================================
// Mask stages
// ========================================================================

#[test]
fn test_value_channel_is_max_rgb() {
    let mut img = tray_image(2, 1);
    img.put_pixel(0, 0, Rgb([10, 200, 60]));
    img.put_pixel(1, 0, Rgb([0, 0, 0]));

    let value = value_channel(&img);

    assert_eq!(value.get_pixel(0, 0)[0], 200);
    assert_eq!(value.get_pixel(1, 0)[0], 0);
}

#[test]
fn test_threshold_dark_polarity_boundary() {
    let mut img = tray_image(2, 1);
    img.put_pixel(0, 0, Rgb([95, 95, 95])); // exactly at threshold
    img.put_pixel(1, 0, Rgb([96, 96, 96])); // one above

    let mask = threshold_dark(&value_channel(&img), 95, 255);

    assert_eq!(mask.get_pixel(0, 0)[0], 255, "value == threshold is foreground");
    assert_eq!(mask.get_pixel(1, 0)[0], 0, "value above threshold is background");
}

#[test]
fn test_threshold_respects_max_value() {
    let mut img = tray_image(1, 1);
    img.put_pixel(0, 0, Rgb([10, 10, 10]));

    let mask = threshold_dark(&value_channel(&img), 95, 128);

    assert_eq!(mask.get_pixel(0, 0)[0], 128);
}

#[test]
fn test_fill_removes_small_specks() {
    let mut img = tray_image(200, 200);
    paint_square(&mut img, 80, 80, 40, PLANT); // area 1600
    paint_square(&mut img, 10, 10, 3, PLANT); // area 9, noise

    let mask = threshold_dark(&value_channel(&img), 95, 255);
    let filled = fill_small_regions(&mask, 100);

    assert_eq!(filled.get_pixel(11, 11)[0], 0, "speck removed");
    assert_eq!(filled.get_pixel(100, 100)[0], 255, "object survives");
}

#[test]
fn test_fill_floor_of_one_is_identity() {
    let mut img = tray_image(50, 50);
    paint_square(&mut img, 10, 10, 3, PLANT);

    let mask = threshold_dark(&value_channel(&img), 95, 255);
    let filled = fill_small_regions(&mask, 1);

    assert_eq!(mask, filled);
}

#[test]
fn test_apply_mask_paints_background_white() {
    let mut img = tray_image(50, 50);
    paint_square(&mut img, 10, 10, 5, PLANT);

    let mask = threshold_dark(&value_channel(&img), 95, 255);
    let masked = apply_mask(&img, &mask).unwrap();

    assert_eq!(*masked.get_pixel(12, 12), PLANT);
    assert_eq!(*masked.get_pixel(30, 30), Rgb([255, 255, 255]));
}

#[test]
fn test_apply_mask_rejects_mismatched_dimensions() {
    let img = tray_image(10, 10);
    let mask = image::GrayImage::new(5, 5);

    assert!(apply_mask(&img, &mask).is_err());
}

// ========================================================================
// End-to-end analysis
// ========================================================================

#[test]
fn test_centered_object_counted() {
    let mut img = tray_image(200, 200);
    paint_square(&mut img, 80, 80, 40, PLANT);

    let result = analyze_region(&decoded(&img), full_rect(&img), &options(100, RoiMode::Partial))
        .unwrap();

    assert_eq!(result.report.pixel_area, 1600);
    assert_eq!(result.report.objects_detected, 1);
    assert_eq!(result.report.objects_kept, 1);
    assert_eq!(result.report.roi, SelectionRect::new(50, 50, 100, 100));
}

#[test]
fn test_partial_keeps_overlapping_object_whole() {
    // Object spans 130..170 on both axes; the centered 100x100 ROI ends at
    // 150, so only a 20x20 corner overlaps. Partial mode still counts the
    // whole object.
    let mut img = tray_image(200, 200);
    paint_square(&mut img, 130, 130, 40, PLANT);

    let result = analyze_region(&decoded(&img), full_rect(&img), &options(100, RoiMode::Partial))
        .unwrap();

    assert_eq!(result.report.pixel_area, 1600);
    assert_eq!(result.report.objects_kept, 1);
}

#[test]
fn test_cutto_counts_only_roi_pixels() {
    let mut img = tray_image(200, 200);
    paint_square(&mut img, 130, 130, 40, PLANT);

    let result = analyze_region(&decoded(&img), full_rect(&img), &options(100, RoiMode::Cutto))
        .unwrap();

    assert_eq!(result.report.pixel_area, 400);
    assert_eq!(result.report.objects_kept, 1);
}

#[test]
fn test_object_outside_roi_not_counted() {
    let mut img = tray_image(200, 200);
    paint_square(&mut img, 0, 0, 20, PLANT);

    let result = analyze_region(&decoded(&img), full_rect(&img), &options(100, RoiMode::Partial))
        .unwrap();

    assert_eq!(result.report.objects_detected, 1);
    assert_eq!(result.report.objects_kept, 0);
    assert_eq!(result.report.pixel_area, 0);
}

#[test]
fn test_fill_larger_than_every_object_reports_zero() {
    // The default 4000-pixel floor removes a 1600-pixel object entirely
    let mut img = tray_image(200, 200);
    paint_square(&mut img, 80, 80, 40, PLANT);

    let result = analyze_region(&decoded(&img), full_rect(&img), &options(4000, RoiMode::Partial))
        .unwrap();

    assert_eq!(result.report.objects_detected, 0);
    assert_eq!(result.report.pixel_area, 0);
}

#[test]
fn test_analysis_is_deterministic() {
    let mut img = tray_image(200, 200);
    paint_square(&mut img, 60, 90, 45, PLANT);
    paint_square(&mut img, 140, 40, 25, PLANT);

    let opts = options(100, RoiMode::Partial);
    let first = analyze_region(&decoded(&img), full_rect(&img), &opts).unwrap();
    let second = analyze_region(&decoded(&img), full_rect(&img), &opts).unwrap();

    assert_eq!(first.report.pixel_area, second.report.pixel_area);
    assert_eq!(first.report.objects_detected, second.report.objects_detected);
    assert_eq!(first.report.objects_kept, second.report.objects_kept);
    assert_eq!(first.masked, second.masked);
}

#[test]
fn test_selection_clamped_to_image_bounds() {
    let mut img = tray_image(200, 200);
    paint_square(&mut img, 160, 160, 30, PLANT);

    let oversized = SelectionRect::new(150, 150, 200, 200);
    let result = analyze_region(&decoded(&img), oversized, &options(100, RoiMode::Partial))
        .unwrap();

    assert_eq!(result.report.crop, SelectionRect::new(150, 150, 50, 50));
    assert_eq!(result.report.pixel_area, 900);
}

#[test]
fn test_empty_selection_is_an_error() {
    let img = tray_image(100, 100);

    let result = analyze_region(
        &decoded(&img),
        SelectionRect::new(10, 10, 0, 0),
        &options(100, RoiMode::Partial),
    );

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("empty"));
}

#[test]
fn test_selection_fully_outside_is_an_error() {
    let img = tray_image(100, 100);

    let result = analyze_region(
        &decoded(&img),
        SelectionRect::new(300, 300, 50, 50),
        &options(100, RoiMode::Partial),
    );

    assert!(result.is_err());
}

#[test]
fn test_cropped_selection_uses_crop_local_roi() {
    // Select the 120x120 top-left corner: the ROI centers in the crop,
    // not in the full image.
    let mut img = tray_image(300, 300);
    paint_square(&mut img, 40, 40, 40, PLANT);

    let rect = SelectionRect::new(0, 0, 120, 120);
    let result = analyze_region(&decoded(&img), rect, &options(100, RoiMode::Partial)).unwrap();

    assert_eq!(result.report.roi, SelectionRect::new(10, 10, 100, 100));
    assert_eq!(result.report.pixel_area, 1600);
}
