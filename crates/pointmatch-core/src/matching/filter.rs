//! Ranking and distance-based suppression of local maxima.

use crate::point::PixelPoint;

use super::maxima::LocalMaximum;

/// Sort by descending score. The sort is stable, so equal scores keep their
/// scan order.
pub fn rank_maxima(maxima: &mut [LocalMaximum]) {
    maxima.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Drops candidates strictly closer than `radius` to any existing point.
/// A candidate sitting on an existing point is dropped even when `radius`
/// is 0.
pub fn exclude_near_points(
    candidates: Vec<LocalMaximum>,
    points_existing: &[PixelPoint],
    radius: u32,
) -> Vec<LocalMaximum> {
    if points_existing.is_empty() {
        return candidates;
    }
    let radius = radius.max(1);
    candidates
        .into_iter()
        .filter(|c| !points_existing.iter().any(|p| c.point.is_within(p, radius)))
        .collect()
}

/// Greedy suppression in the given order: a candidate is kept only if it
/// is at least `separation` away from every candidate kept before it.
///
/// Call on a ranked list so the stronger of two crowded candidates wins.
pub fn suppress_crowded(candidates: Vec<LocalMaximum>, separation: u32) -> Vec<LocalMaximum> {
    if separation == 0 {
        return candidates;
    }

    let mut kept: Vec<LocalMaximum> = Vec::with_capacity(candidates.len());
    'outer: for candidate in candidates {
        for k in kept.iter() {
            if candidate.point.is_within(&k.point, separation) {
                continue 'outer;
            }
        }
        kept.push(candidate);
    }
    kept
}
