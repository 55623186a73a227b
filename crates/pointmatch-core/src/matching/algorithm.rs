use tracing::{debug, info};

use crate::consts::EPSILON;
use crate::error::{PointMatchError, Result};
use crate::point::{MatchList, PixelPoint, PointMatch};
use crate::processed::ProcessedImage;
use crate::spectral::{optimize_length_for_fft, RealArray, SpectralPlan};

use super::config::PointMatchConfig;
use super::convolution::{compute_convolution, correlation_at, CorrelationSurface};
use super::filter::{exclude_near_points, rank_maxima, suppress_crowded};
use super::maxima::assemble_local_maxima;
use super::sample::{load_sample, LoadedSample, TemplateExtent};
use super::target::{load_image, LoadedImage};
use super::types::{MatchStage, NoOpReporter, ProgressReporter};

/// Find points in `image_processed` that look like the sample, best first.
///
/// `sample_point_pixels` are the foreground pixels of the template in image
/// coordinates. Nothing is reported within `config.point_separation` of a
/// point in `points_existing`, and no two matches are closer than that.
pub fn find_matches(
    sample_point_pixels: &[PixelPoint],
    image_processed: &ProcessedImage,
    config: &PointMatchConfig,
    points_existing: &[PixelPoint],
) -> Result<MatchList> {
    find_matches_reported(
        sample_point_pixels,
        image_processed,
        config,
        points_existing,
        &NoOpReporter,
    )
}

/// [`find_matches`] with stage-by-stage progress reporting.
pub fn find_matches_reported(
    sample_point_pixels: &[PixelPoint],
    image_processed: &ProcessedImage,
    config: &PointMatchConfig,
    points_existing: &[PixelPoint],
    reporter: &dyn ProgressReporter,
) -> Result<MatchList> {
    let Some(Correlated {
        surface,
        extent,
        image,
        sample,
        sample_energy,
    }) = correlate(
        sample_point_pixels,
        image_processed,
        config,
        points_existing,
        reporter,
    )?
    else {
        return Ok(MatchList::new());
    };

    reporter.begin_stage(MatchStage::ScanningMaxima);
    let mut maxima = assemble_local_maxima(&surface, &extent, config.min_score);
    drop(surface);
    // Exact image-space scores, free of transform rounding.
    for m in maxima.iter_mut() {
        m.score = correlation_at(
            &image,
            &sample,
            &extent,
            m.point.x as usize,
            m.point.y as usize,
            sample_energy,
        )?;
    }
    drop(image);
    drop(sample);
    reporter.finish_stage();

    reporter.begin_stage(MatchStage::Ranking);
    rank_maxima(&mut maxima);
    let candidates = exclude_near_points(maxima, points_existing, config.point_separation);
    let mut candidates = suppress_crowded(candidates, config.point_separation);
    if let Some(limit) = config.max_matches {
        candidates.truncate(limit);
    }
    let matches: MatchList = candidates
        .into_iter()
        .enumerate()
        .map(|(rank, m)| PointMatch::new(m.point, m.score, rank))
        .collect();
    reporter.finish_stage();

    info!(
        matches = matches.len(),
        best_score = ?matches.first().map(|m| m.score()),
        "Point match complete"
    );
    Ok(matches)
}

/// Normalized correlation surface of the sample against the image, after
/// existing points are excluded. `None` when nothing can match: the
/// template is larger than the image, or the image has no foreground left.
pub fn compute_surface(
    sample_point_pixels: &[PixelPoint],
    image_processed: &ProcessedImage,
    config: &PointMatchConfig,
    points_existing: &[PixelPoint],
) -> Result<Option<CorrelationSurface>> {
    Ok(correlate(
        sample_point_pixels,
        image_processed,
        config,
        points_existing,
        &NoOpReporter,
    )?
    .map(|c| c.surface))
}

/// Everything the scan and rescoring steps need from the correlation.
struct Correlated {
    surface: CorrelationSurface,
    extent: TemplateExtent,
    image: RealArray,
    sample: RealArray,
    sample_energy: f64,
}

fn validate_inputs(
    sample_point_pixels: &[PixelPoint],
    image_processed: &ProcessedImage,
    config: &PointMatchConfig,
) -> Result<()> {
    if sample_point_pixels.is_empty() {
        return Err(PointMatchError::InvalidInput(
            "sample point set is empty".into(),
        ));
    }
    if image_processed.width() == 0 || image_processed.height() == 0 {
        return Err(PointMatchError::InvalidInput(format!(
            "image dimensions must be positive, got {}x{}",
            image_processed.width(),
            image_processed.height()
        )));
    }
    config.validate()
}

/// Load both arrays on a shared padded canvas and correlate them.
///
/// Transforms are owned locals, dropped as soon as the next step no longer
/// needs them and on every early return. The spatial arrays are handed back
/// for rescoring.
fn correlate(
    sample_point_pixels: &[PixelPoint],
    image_processed: &ProcessedImage,
    config: &PointMatchConfig,
    points_existing: &[PixelPoint],
    reporter: &dyn ProgressReporter,
) -> Result<Option<Correlated>> {
    validate_inputs(sample_point_pixels, image_processed, config)?;

    let image_width = image_processed.width();
    let image_height = image_processed.height();
    let bounds = TemplateExtent::from_points(sample_point_pixels)?;
    if bounds.footprint_width() > image_width || bounds.footprint_height() > image_height {
        debug!(
            sample_width = bounds.footprint_width(),
            sample_height = bounds.footprint_height(),
            image_width,
            image_height,
            "Sample larger than image, nothing to match"
        );
        return Ok(None);
    }

    // Room for the template past the right/bottom edges keeps the circular
    // correlation from wrapping across the image.
    let width = optimize_length_for_fft(image_width + bounds.x_extent());
    let height = optimize_length_for_fft(image_height + bounds.y_extent());
    let plan = SpectralPlan::new(width, height)?;
    debug!(
        image_width,
        image_height,
        padded_width = width,
        padded_height = height,
        "Transform canvas sized"
    );

    reporter.begin_stage(MatchStage::LoadingImage);
    let LoadedImage {
        image, image_prime, ..
    } = load_image(image_processed, config, points_existing, &plan)?;
    let image_energy = image.energy();
    reporter.finish_stage();
    if image_energy <= EPSILON {
        debug!("Image has no foreground pixels after exclusion");
        return Ok(None);
    }

    reporter.begin_stage(MatchStage::LoadingSample);
    let LoadedSample {
        sample,
        sample_prime,
        extent,
    } = load_sample(sample_point_pixels, &plan)?;
    let sample_energy = sample.energy();
    reporter.finish_stage();
    if sample_energy <= EPSILON {
        debug!("Sample template has no foreground pixels");
        return Ok(None);
    }

    reporter.begin_stage(MatchStage::Convolving);
    let surface = compute_convolution(
        &plan,
        &image_prime,
        sample_prime,
        &extent,
        image_width,
        image_height,
        sample_energy,
    )?;
    reporter.finish_stage();

    Ok(Some(Correlated {
        surface,
        extent,
        image,
        sample,
        sample_energy,
    }))
}
