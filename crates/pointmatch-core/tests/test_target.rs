mod common;

use ndarray::array;
use pointmatch_core::error::PointMatchError;
use pointmatch_core::matching::target::{load_image, remove_pixels_near_existing_points};
use pointmatch_core::matching::PointMatchConfig;
use pointmatch_core::point::PixelPoint;
use pointmatch_core::processed::ProcessedImage;
use pointmatch_core::spectral::{RealArray, SpectralPlan};

use common::image_with_points;

fn all_on(width: usize, height: usize) -> RealArray {
    let mut array = RealArray::zeros(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            array.set(x, y, 1.0);
        }
    }
    array
}

#[test]
fn test_threshold_encoding_and_padding() {
    let image = ProcessedImage::new(array![
        [0.0, 0.5, 1.0, 0.49],
        [0.2, 0.9, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.51],
    ]);
    let config = PointMatchConfig {
        point_separation: 0,
        ..Default::default()
    };
    let plan = SpectralPlan::new(6, 5).unwrap();

    let loaded = load_image(&image, &config, &[], &plan).unwrap();
    assert_eq!(loaded.image.dims(), (6, 5));
    assert_eq!(loaded.image.get(1, 0), 1.0);
    assert_eq!(loaded.image.get(2, 0), 1.0);
    assert_eq!(loaded.image.get(3, 0), 0.0);
    assert_eq!(loaded.image.get(1, 1), 1.0);
    assert_eq!(loaded.image.get(3, 2), 1.0);
    assert_eq!(loaded.image.get(0, 1), 0.0);
    // Padding stays empty.
    assert_eq!(loaded.image.get(5, 4), 0.0);
    assert_eq!(loaded.image.energy(), 4.0);
    assert_eq!(loaded.pixels_removed, 0);
}

#[test]
fn test_exclusion_disk_is_strict() {
    let mut array = all_on(11, 11);
    let removed = remove_pixels_near_existing_points(&mut array, &[PixelPoint::new(5, 5)], 2);

    // dx^2 + dy^2 < 4: the 3x3 block around the point.
    assert_eq!(removed, 9);
    assert_eq!(array.get(5, 5), 0.0);
    assert_eq!(array.get(4, 4), 0.0);
    assert_eq!(array.get(6, 6), 0.0);
    assert_eq!(array.get(7, 5), 1.0);
    assert_eq!(array.get(5, 3), 1.0);
    assert_eq!(array.energy(), 121.0 - 9.0);
}

#[test]
fn test_exclusion_is_clipped_at_edges() {
    let mut array = all_on(6, 6);
    let removed = remove_pixels_near_existing_points(&mut array, &[PixelPoint::new(0, 0)], 2);
    assert_eq!(removed, 4);
    assert_eq!(array.get(1, 1), 0.0);
    assert_eq!(array.get(2, 0), 1.0);
}

#[test]
fn test_exclusion_only_counts_foreground_once() {
    let mut array = all_on(11, 11);
    let points = [PixelPoint::new(5, 5), PixelPoint::new(5, 5)];
    assert_eq!(remove_pixels_near_existing_points(&mut array, &points, 3), 25);
    assert_eq!(remove_pixels_near_existing_points(&mut array, &points, 3), 0);
}

#[test]
fn test_exclusion_ignores_far_points() {
    let mut array = all_on(8, 8);
    assert_eq!(
        remove_pixels_near_existing_points(&mut array, &[PixelPoint::new(-50, 100)], 10),
        0
    );
    assert_eq!(array.energy(), 64.0);
}

#[test]
fn test_zero_radius_clears_only_the_existing_pixel() {
    let mut array = all_on(8, 8);
    assert_eq!(
        remove_pixels_near_existing_points(&mut array, &[PixelPoint::new(3, 3)], 0),
        1
    );
    assert_eq!(array.get(3, 3), 0.0);
    assert_eq!(array.get(4, 3), 1.0);
    assert_eq!(array.energy(), 63.0);
}

#[test]
fn test_load_image_applies_exclusion() {
    let image = image_with_points(
        10,
        10,
        &[PixelPoint::new(2, 2), PixelPoint::new(3, 2), PixelPoint::new(8, 8)],
    );
    let config = PointMatchConfig {
        point_separation: 3,
        ..Default::default()
    };
    let plan = SpectralPlan::new(10, 10).unwrap();

    let loaded = load_image(&image, &config, &[PixelPoint::new(2, 2)], &plan).unwrap();
    assert_eq!(loaded.pixels_removed, 2);
    assert_eq!(loaded.image.get(2, 2), 0.0);
    assert_eq!(loaded.image.get(3, 2), 0.0);
    assert_eq!(loaded.image.get(8, 8), 1.0);
}

#[test]
fn test_image_larger_than_canvas_is_invalid() {
    let image = image_with_points(12, 4, &[]);
    let plan = SpectralPlan::new(8, 8).unwrap();
    assert!(matches!(
        load_image(&image, &PointMatchConfig::default(), &[], &plan),
        Err(PointMatchError::InvalidInput(_))
    ));
}
