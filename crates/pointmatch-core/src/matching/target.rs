use tracing::debug;

use crate::error::{PointMatchError, Result};
use crate::point::PixelPoint;
use crate::processed::ProcessedImage;
use crate::spectral::{ComplexArray, RealArray, SpectralPlan};

use super::config::PointMatchConfig;

/// Padded image array, its transform, and how many foreground pixels the
/// exclusion step removed.
pub struct LoadedImage {
    pub image: RealArray,
    pub image_prime: ComplexArray,
    pub pixels_removed: usize,
}

/// Load the image array and its transform.
///
/// Foreground pixels become 1.0 and everything else (including padding)
/// 0.0, the same encoding the sample template uses. Pixels near existing
/// points are switched off before the transform so those points are not
/// detected again.
pub fn load_image(
    image: &ProcessedImage,
    config: &PointMatchConfig,
    points_existing: &[PixelPoint],
    plan: &SpectralPlan,
) -> Result<LoadedImage> {
    if image.width() > plan.width() || image.height() > plan.height() {
        return Err(PointMatchError::InvalidInput(format!(
            "image {}x{} exceeds canvas {}x{}",
            image.width(),
            image.height(),
            plan.width(),
            plan.height()
        )));
    }

    let mut array = populate_image_array(image, config.on_threshold, plan.width(), plan.height())?;
    let pixels_removed =
        remove_pixels_near_existing_points(&mut array, points_existing, config.point_separation);
    let image_prime = plan.forward(&array)?;

    debug!(
        existing = points_existing.len(),
        pixels_removed,
        "Image loaded"
    );

    Ok(LoadedImage {
        image: array,
        image_prime,
        pixels_removed,
    })
}

fn populate_image_array(
    image: &ProcessedImage,
    on_threshold: f32,
    width: usize,
    height: usize,
) -> Result<RealArray> {
    let mut array = RealArray::zeros(width, height)?;
    for ((y, x), &value) in image.data.indexed_iter() {
        if value >= on_threshold {
            array.set(x, y, 1.0);
        }
    }
    Ok(array)
}

/// Switch off every cell strictly closer than `point_separation` to an
/// existing point. The existing pixel itself is always cleared, even at zero
/// separation. Returns the number of foreground cells removed.
pub fn remove_pixels_near_existing_points(
    array: &mut RealArray,
    points_existing: &[PixelPoint],
    point_separation: u32,
) -> usize {
    if array.width() == 0 || array.height() == 0 {
        return 0;
    }

    let r = point_separation.max(1) as i64;
    let x_last = array.width() as i64 - 1;
    let y_last = array.height() as i64 - 1;
    let mut removed = 0;

    for point in points_existing {
        let (px, py) = (point.x as i64, point.y as i64);
        let y_min = (py - r + 1).max(0);
        let y_max = (py + r - 1).min(y_last);

        for y in y_min..=y_max {
            let dy = y - py;
            let radical = r * r - dy * dy;
            if radical <= 0 {
                continue;
            }
            // Largest dx with dx^2 < radical.
            let mut dx = (radical as f64).sqrt() as i64;
            while dx * dx >= radical {
                dx -= 1;
            }
            while (dx + 1) * (dx + 1) < radical {
                dx += 1;
            }

            let x_min = (px - dx).max(0);
            let x_max = (px + dx).min(x_last);
            for x in x_min..=x_max {
                let (ux, uy) = (x as usize, y as usize);
                if array.get(ux, uy) != 0.0 {
                    array.set(ux, uy, 0.0);
                    removed += 1;
                }
            }
        }
    }

    removed
}
