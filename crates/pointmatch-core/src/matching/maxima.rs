use ndarray::Array2;
use tracing::debug;

use crate::point::PixelPoint;

use super::convolution::CorrelationSurface;
use super::sample::TemplateExtent;

/// Scan state of one surface cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelState {
    /// Score is at or below the threshold.
    Off,
    /// Score is above the threshold and the cell has not been visited.
    OnUnscanned,
    /// Visited, or consumed by a maximum's window. Ignored from now on.
    OnScanned,
}

/// A regional maximum of the correlation surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalMaximum {
    pub point: PixelPoint,
    pub score: f64,
}

/// Inclusive window bounds around `pos` on one axis, clipped to `[0, len)`.
/// The window spans the template footprint, offset so the template center
/// lies on `pos`.
fn window(pos: usize, delta_min: usize, delta_max: usize, len: usize) -> (usize, usize) {
    let lo = pos.saturating_sub(delta_min);
    let hi = (pos + delta_max).min(len - 1);
    (lo, hi)
}

/// Find each local maximum that is the largest value in a region as big as
/// the sample, centered about that maximum.
///
/// Single raster-order pass (top-to-bottom, left-to-right). When a cell is
/// not exceeded by anything in its window it is emitted and the whole window
/// is consumed, so equal values later in the same window are not reported.
/// Results come back in scan order.
pub fn assemble_local_maxima(
    surface: &CorrelationSurface,
    extent: &TemplateExtent,
    min_score: f64,
) -> Vec<LocalMaximum> {
    let scores = surface.as_array();
    let (h, w) = scores.dim();
    let mut states = Array2::from_shape_fn((h, w), |(y, x)| {
        if scores[[y, x]] > min_score {
            PixelState::OnUnscanned
        } else {
            PixelState::Off
        }
    });

    let mut maxima = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if states[[y, x]] != PixelState::OnUnscanned {
                continue;
            }

            let value = scores[[y, x]];
            let (x_lo, x_hi) = window(x, extent.x_delta_min(), extent.x_delta_max(), w);
            let (y_lo, y_hi) = window(y, extent.y_delta_min(), extent.y_delta_max(), h);

            let is_max = (y_lo..=y_hi)
                .all(|wy| (x_lo..=x_hi).all(|wx| scores[[wy, wx]] <= value));

            if is_max {
                maxima.push(LocalMaximum {
                    point: PixelPoint::new(x as i32, y as i32),
                    score: value,
                });
                for wy in y_lo..=y_hi {
                    for wx in x_lo..=x_hi {
                        if states[[wy, wx]] != PixelState::Off {
                            states[[wy, wx]] = PixelState::OnScanned;
                        }
                    }
                }
            } else {
                states[[y, x]] = PixelState::OnScanned;
            }
        }
    }

    debug!(maxima = maxima.len(), min_score, "Local maxima assembled");
    maxima
}
