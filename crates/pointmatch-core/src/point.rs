use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PointMatchError;

/// Integer pixel position in image space. `x` grows rightwards, `y` downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, computed in `i64` so it cannot overflow.
    pub fn distance_squared(&self, other: &PixelPoint) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }

    /// True when `other` lies strictly closer than `radius`.
    pub fn is_within(&self, other: &PixelPoint, radius: u32) -> bool {
        let r = radius as i64;
        self.distance_squared(other) < r * r
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parses `"X,Y"`, with optional whitespace around either coordinate.
impl FromStr for PixelPoint {
    type Err = PointMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PointMatchError::InvalidInput(format!("expected X,Y but got '{s}'"));
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Self { x, y })
    }
}

/// One ranked match: where it is, how well the template fits there, and its
/// position in the final list (0 = best).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMatch {
    point: PixelPoint,
    score: f64,
    rank: usize,
}

impl PointMatch {
    pub fn new(point: PixelPoint, score: f64, rank: usize) -> Self {
        Self { point, score, rank }
    }

    pub fn point(&self) -> PixelPoint {
        self.point
    }

    /// Normalized correlation score; 1.0 means every template pixel lies on
    /// foreground.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// Matches sorted best first.
pub type MatchList = Vec<PointMatch>;
