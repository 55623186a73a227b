use ndarray::Array2;
use tracing::debug;

use crate::consts::EPSILON;
use crate::error::{PointMatchError, Result};
use crate::point::PixelPoint;
use crate::spectral::{conjugate_in_place, multiply, ComplexArray, RealArray, SpectralPlan};

use super::sample::TemplateExtent;

/// Normalized correlation scores over the unpadded image.
///
/// Cell `(x, y)` scores the template placed with its center on pixel
/// `(x, y)`: the fraction of template pixels that land on foreground.
#[derive(Clone, Debug)]
pub struct CorrelationSurface {
    /// Scores, row-major, shape = (height, width)
    scores: Array2<f64>,
}

impl CorrelationSurface {
    pub fn from_scores(scores: Array2<f64>) -> Self {
        Self { scores }
    }

    /// Re-index a raw correlation array from template anchor (top-left
    /// corner) to template center, crop it to the image, and divide by the
    /// template energy.
    ///
    /// Sample and image are occupancy grids, so each raw value counts
    /// overlapping pixels and is rounded to that integer first.
    pub fn from_correlation(
        correlation: &RealArray,
        extent: &TemplateExtent,
        image_width: usize,
        image_height: usize,
        sample_energy: f64,
    ) -> Result<Self> {
        if sample_energy <= EPSILON {
            return Err(PointMatchError::InvalidInput(
                "sample template has no foreground pixels".into(),
            ));
        }
        let (w, h) = correlation.dims();
        if image_width > w || image_height > h || extent.x_center() >= w || extent.y_center() >= h
        {
            return Err(PointMatchError::DimensionMismatch {
                left_width: image_width,
                left_height: image_height,
                right_width: w,
                right_height: h,
            });
        }

        let mut scores = Array2::<f64>::zeros((image_height, image_width));
        for y in 0..image_height {
            // Negative anchors wrap into the zero padding past the image.
            let ay = (y + h - extent.y_center()) % h;
            for x in 0..image_width {
                let ax = (x + w - extent.x_center()) % w;
                scores[[y, x]] = correlation.get(ax, ay).round() / sample_energy;
            }
        }

        Ok(Self { scores })
    }

    pub fn width(&self) -> usize {
        self.scores.ncols()
    }

    pub fn height(&self) -> usize {
        self.scores.nrows()
    }

    pub fn score(&self, x: usize, y: usize) -> f64 {
        self.scores[[y, x]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.scores
    }

    /// Highest-scoring cell, first in raster order on ties.
    pub fn peak(&self) -> Option<(PixelPoint, f64)> {
        let mut best: Option<(PixelPoint, f64)> = None;
        for ((y, x), &value) in self.scores.indexed_iter() {
            let better = match best {
                Some((_, b)) => value > b,
                None => true,
            };
            if better {
                best = Some((PixelPoint::new(x as i32, y as i32), value));
            }
        }
        best
    }
}

/// Correlate the sample with the image directly in image space, for the
/// template centered on `(x, y)`. Template cells falling outside the image
/// array contribute nothing.
///
/// Both arrays are indexed as the loaders leave them: the template anchored
/// at the origin, the image unshifted.
pub fn correlation_at(
    image: &RealArray,
    sample: &RealArray,
    extent: &TemplateExtent,
    x: usize,
    y: usize,
    sample_energy: f64,
) -> Result<f64> {
    if sample_energy <= EPSILON {
        return Err(PointMatchError::InvalidInput(
            "sample template has no foreground pixels".into(),
        ));
    }
    let (w, h) = image.dims();
    let x0 = x as i64 - extent.x_delta_min() as i64;
    let y0 = y as i64 - extent.y_delta_min() as i64;

    let mut sum = 0.0;
    for v in 0..extent.footprint_height() {
        let iy = y0 + v as i64;
        if iy < 0 || iy >= h as i64 {
            continue;
        }
        for u in 0..extent.footprint_width() {
            let ix = x0 + u as i64;
            if ix < 0 || ix >= w as i64 {
                continue;
            }
            let weight = sample.get(u, v);
            if weight != 0.0 {
                sum += weight * image.get(ix as usize, iy as usize);
            }
        }
    }
    Ok(sum / sample_energy)
}

/// Correlate image and sample in transform space:
/// `F^-1{ F(image) * conj(F(sample)) }`.
///
/// The sample transform is conjugated in place and consumed. The inverse
/// transform divides by the padded size; the surface then divides by the
/// template energy so scores are comparable across template sizes.
pub fn compute_convolution(
    plan: &SpectralPlan,
    image_prime: &ComplexArray,
    mut sample_prime: ComplexArray,
    extent: &TemplateExtent,
    image_width: usize,
    image_height: usize,
    sample_energy: f64,
) -> Result<CorrelationSurface> {
    conjugate_in_place(&mut sample_prime);
    let convolution_prime = multiply(image_prime, &sample_prime)?;
    drop(sample_prime);

    let convolution = plan.inverse(&convolution_prime)?;
    drop(convolution_prime);

    let surface = CorrelationSurface::from_correlation(
        &convolution,
        extent,
        image_width,
        image_height,
        sample_energy,
    )?;
    debug!(
        width = surface.width(),
        height = surface.height(),
        "Correlation surface computed"
    );
    Ok(surface)
}
