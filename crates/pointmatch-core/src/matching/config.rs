use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MIN_SCORE, DEFAULT_ON_THRESHOLD, DEFAULT_POINT_SEPARATION};
use crate::error::{PointMatchError, Result};

/// Point-match settings supplied by the document layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointMatchConfig {
    /// Exclusion radius around existing points, and the minimum distance
    /// between two reported matches (pixels).
    #[serde(default = "default_point_separation")]
    pub point_separation: u32,
    /// Normalized score a pixel must exceed to become a candidate, in [0.0, 1.0).
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    /// Processed-image intensity at or above which a pixel is foreground,
    /// in (0.0, 1.0].
    #[serde(default = "default_on_threshold")]
    pub on_threshold: f32,
    /// Keep at most this many matches.
    #[serde(default)]
    pub max_matches: Option<usize>,
}

fn default_point_separation() -> u32 {
    DEFAULT_POINT_SEPARATION
}
fn default_min_score() -> f64 {
    DEFAULT_MIN_SCORE
}
fn default_on_threshold() -> f32 {
    DEFAULT_ON_THRESHOLD
}

impl Default for PointMatchConfig {
    fn default() -> Self {
        Self {
            point_separation: DEFAULT_POINT_SEPARATION,
            min_score: DEFAULT_MIN_SCORE,
            on_threshold: DEFAULT_ON_THRESHOLD,
            max_matches: None,
        }
    }
}

impl PointMatchConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.min_score) {
            return Err(PointMatchError::InvalidInput(format!(
                "min_score must be in [0, 1), got {}",
                self.min_score
            )));
        }
        if !(self.on_threshold > 0.0 && self.on_threshold <= 1.0) {
            return Err(PointMatchError::InvalidInput(format!(
                "on_threshold must be in (0, 1], got {}",
                self.on_threshold
            )));
        }
        if self.max_matches == Some(0) {
            return Err(PointMatchError::InvalidInput(
                "max_matches must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
