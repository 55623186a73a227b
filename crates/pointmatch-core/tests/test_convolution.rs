mod common;

use approx::assert_abs_diff_eq;
use pointmatch_core::error::PointMatchError;
use pointmatch_core::matching::convolution::{compute_convolution, correlation_at};
use pointmatch_core::matching::sample::load_sample;
use pointmatch_core::matching::target::load_image;
use pointmatch_core::matching::{compute_surface, CorrelationSurface, PointMatchConfig, TemplateExtent};
use pointmatch_core::point::PixelPoint;
use pointmatch_core::spectral::{RealArray, SpectralPlan};

use common::{image_with_points, l_shape, plus_shape};

fn no_exclusion() -> PointMatchConfig {
    PointMatchConfig {
        point_separation: 0,
        ..Default::default()
    }
}

#[test]
fn test_delta_correlation_peaks_at_delta() {
    let plan = SpectralPlan::new(8, 6).unwrap();
    let mut image = RealArray::zeros(8, 6).unwrap();
    image.set(3, 2, 1.0);
    let image_prime = plan.forward(&image).unwrap();
    let loaded = load_sample(&[PixelPoint::new(0, 0)], &plan).unwrap();

    let surface = compute_convolution(
        &plan,
        &image_prime,
        loaded.sample_prime,
        &loaded.extent,
        8,
        6,
        loaded.sample.energy(),
    )
    .unwrap();

    let (peak, score) = surface.peak().unwrap();
    assert_eq!(peak, PixelPoint::new(3, 2));
    assert_abs_diff_eq!(score, 1.0, epsilon = 1e-9);
    for y in 0..6 {
        for x in 0..8 {
            if (x, y) != (3, 2) {
                assert_abs_diff_eq!(surface.score(x, y), 0.0, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_self_correlation_has_single_strict_maximum() {
    let sample = plus_shape(5, 5, 2);
    let image = image_with_points(40, 30, &plus_shape(30, 20, 2));

    let surface = compute_surface(&sample, &image, &no_exclusion(), &[])
        .unwrap()
        .unwrap();
    assert_eq!((surface.width(), surface.height()), (40, 30));

    let (peak, best) = surface.peak().unwrap();
    assert_eq!(peak, PixelPoint::new(30, 20));
    assert_abs_diff_eq!(best, 1.0, epsilon = 1e-9);
    for y in 0..30 {
        for x in 0..40 {
            if (x, y) != (30, 20) {
                assert!(surface.score(x, y) < best - 0.5, "({x}, {y})");
            }
        }
    }
}

#[test]
fn test_surface_is_indexed_by_template_center() {
    let image = image_with_points(20, 20, &l_shape(10, 10));
    let surface = compute_surface(&l_shape(0, 0), &image, &no_exclusion(), &[])
        .unwrap()
        .unwrap();

    assert_abs_diff_eq!(surface.score(10, 10), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(surface.score(9, 10), 1.0 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(surface.score(10, 9), 1.0 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(surface.score(9, 9), 0.0, epsilon = 1e-9);
}

#[test]
fn test_correlation_does_not_wrap_across_edges() {
    let image = image_with_points(12, 12, &plus_shape(10, 6, 2));
    let surface = compute_surface(&plus_shape(2, 2, 2), &image, &no_exclusion(), &[])
        .unwrap()
        .unwrap();

    // One arm pixel falls outside the image.
    assert_abs_diff_eq!(surface.score(10, 6), 8.0 / 9.0, epsilon = 1e-9);
    // Nothing near the opposite edge picks up mass from the right side.
    assert_abs_diff_eq!(surface.score(1, 6), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(surface.score(0, 6), 0.0, epsilon = 1e-9);
}

#[test]
fn test_zero_energy_template_is_rejected() {
    let correlation = RealArray::zeros(4, 4).unwrap();
    let extent = TemplateExtent::from_points(&[PixelPoint::new(0, 0)]).unwrap();
    assert!(matches!(
        CorrelationSurface::from_correlation(&correlation, &extent, 4, 4, 0.0),
        Err(PointMatchError::InvalidInput(_))
    ));
}

#[test]
fn test_surface_larger_than_correlation_is_rejected() {
    let correlation = RealArray::zeros(4, 4).unwrap();
    let extent = TemplateExtent::from_points(&[PixelPoint::new(0, 0)]).unwrap();
    assert!(matches!(
        CorrelationSurface::from_correlation(&correlation, &extent, 5, 4, 1.0),
        Err(PointMatchError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_image_space_correlation_matches_surface() {
    let sample_points = plus_shape(2, 2, 2);
    // Plus clipped by the top-left corner: five pixels survive.
    let image = image_with_points(20, 20, &plus_shape(0, 0, 2));
    let config = PointMatchConfig::default();
    let plan = SpectralPlan::new(24, 24).unwrap();

    let loaded_image = load_image(&image, &config, &[], &plan).unwrap();
    let loaded_sample = load_sample(&sample_points, &plan).unwrap();
    let energy = loaded_sample.sample.energy();
    let score_at = |x, y| {
        correlation_at(
            &loaded_image.image,
            &loaded_sample.sample,
            &loaded_sample.extent,
            x,
            y,
            energy,
        )
        .unwrap()
    };

    assert_eq!(score_at(0, 0), 5.0 / 9.0);
    assert_eq!(score_at(1, 0), 3.0 / 9.0);
    assert_eq!(score_at(10, 10), 0.0);

    let surface = compute_surface(&sample_points, &image, &config, &[])
        .unwrap()
        .unwrap();
    for (x, y) in [(0, 0), (1, 0), (0, 1), (2, 2), (10, 10)] {
        assert_eq!(surface.score(x, y), score_at(x, y), "({x}, {y})");
    }
}

#[test]
fn test_image_space_correlation_rejects_empty_template() {
    let plan = SpectralPlan::new(8, 8).unwrap();
    let loaded = load_sample(&l_shape(0, 0), &plan).unwrap();
    let image = RealArray::zeros(8, 8).unwrap();
    let err = correlation_at(&image, &loaded.sample, &loaded.extent, 0, 0, 0.0).unwrap_err();
    assert!(matches!(err, PointMatchError::InvalidInput(_)));
}
