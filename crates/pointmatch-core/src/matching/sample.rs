use tracing::debug;

use crate::error::{PointMatchError, Result};
use crate::point::PixelPoint;
use crate::spectral::{ComplexArray, RealArray, SpectralPlan};

/// Bounding box of the sample template in its own frame.
///
/// `x_extent`/`y_extent` are spans (`max - min`), so a single-pixel sample
/// has zero extent and its footprint is one cell. The center is measured
/// from the box's top-left corner, which sits at `origin` in image space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemplateExtent {
    origin: PixelPoint,
    x_center: usize,
    y_center: usize,
    x_extent: usize,
    y_extent: usize,
}

impl TemplateExtent {
    /// Compute the bounding box of a non-empty set of sample pixels.
    pub fn from_points(points: &[PixelPoint]) -> Result<Self> {
        let first = points.first().ok_or_else(|| {
            PointMatchError::InvalidInput("sample point set is empty".into())
        })?;

        let (mut x_min, mut x_max) = (first.x as i64, first.x as i64);
        let (mut y_min, mut y_max) = (first.y as i64, first.y as i64);
        for p in &points[1..] {
            x_min = x_min.min(p.x as i64);
            x_max = x_max.max(p.x as i64);
            y_min = y_min.min(p.y as i64);
            y_max = y_max.max(p.y as i64);
        }

        Ok(Self {
            origin: PixelPoint::new(x_min as i32, y_min as i32),
            x_center: ((x_min + x_max).div_euclid(2) - x_min) as usize,
            y_center: ((y_min + y_max).div_euclid(2) - y_min) as usize,
            x_extent: (x_max - x_min) as usize,
            y_extent: (y_max - y_min) as usize,
        })
    }

    /// Top-left corner of the bounding box in image space.
    pub fn origin(&self) -> PixelPoint {
        self.origin
    }

    pub fn x_center(&self) -> usize {
        self.x_center
    }

    pub fn y_center(&self) -> usize {
        self.y_center
    }

    pub fn x_extent(&self) -> usize {
        self.x_extent
    }

    pub fn y_extent(&self) -> usize {
        self.y_extent
    }

    /// Columns the template reaches left of its center.
    pub fn x_delta_min(&self) -> usize {
        self.x_center
    }

    /// Columns the template reaches right of its center.
    pub fn x_delta_max(&self) -> usize {
        self.x_extent - self.x_center
    }

    pub fn y_delta_min(&self) -> usize {
        self.y_center
    }

    pub fn y_delta_max(&self) -> usize {
        self.y_extent - self.y_center
    }

    /// Number of columns the template covers.
    pub fn footprint_width(&self) -> usize {
        self.x_extent + 1
    }

    /// Number of rows the template covers.
    pub fn footprint_height(&self) -> usize {
        self.y_extent + 1
    }

    /// Template center in image space.
    pub fn center_in_image(&self) -> PixelPoint {
        PixelPoint::new(
            self.origin.x + self.x_center as i32,
            self.origin.y + self.y_center as i32,
        )
    }
}

/// Padded template array, its transform, and its bounding box.
pub struct LoadedSample {
    pub sample: RealArray,
    pub sample_prime: ComplexArray,
    pub extent: TemplateExtent,
}

/// Load the sample array and its transform, and compute the template extent.
///
/// The sample array has the plan's padded size so its transform multiplies
/// element by element with the image transform.
pub fn load_sample(sample_points: &[PixelPoint], plan: &SpectralPlan) -> Result<LoadedSample> {
    let extent = TemplateExtent::from_points(sample_points)?;
    if extent.footprint_width() > plan.width() || extent.footprint_height() > plan.height() {
        return Err(PointMatchError::InvalidInput(format!(
            "sample footprint {}x{} exceeds canvas {}x{}",
            extent.footprint_width(),
            extent.footprint_height(),
            plan.width(),
            plan.height()
        )));
    }

    let sample = populate_sample_array(sample_points, &extent, plan.width(), plan.height())?;
    let sample_prime = plan.forward(&sample)?;

    debug!(
        points = sample_points.len(),
        x_extent = extent.x_extent(),
        y_extent = extent.y_extent(),
        x_center = extent.x_center(),
        y_center = extent.y_center(),
        "Sample loaded"
    );

    Ok(LoadedSample {
        sample,
        sample_prime,
        extent,
    })
}

/// 1.0 at every sample pixel, shifted so the bounding box starts at (0, 0).
fn populate_sample_array(
    sample_points: &[PixelPoint],
    extent: &TemplateExtent,
    width: usize,
    height: usize,
) -> Result<RealArray> {
    let mut sample = RealArray::zeros(width, height)?;
    let origin = extent.origin();
    for p in sample_points {
        let x = (p.x as i64 - origin.x as i64) as usize;
        let y = (p.y as i64 - origin.y as i64) as usize;
        sample.set(x, y, 1.0);
    }
    Ok(sample)
}
