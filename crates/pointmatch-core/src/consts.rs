/// Primes whose products make transform lengths cheap to evaluate.
pub const FFT_FRIENDLY_PRIMES: [usize; 4] = [2, 3, 5, 7];

/// Default exclusion radius around existing points, which is also the
/// minimum distance between two reported matches (pixels).
pub const DEFAULT_POINT_SEPARATION: u32 = 20;

/// Default normalized score a pixel must exceed to be a match candidate.
/// 1.0 means every template pixel lands on foreground.
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Default intensity at or above which a processed-image pixel is foreground.
pub const DEFAULT_ON_THRESHOLD: f32 = 0.5;

/// Energies at or below this value are treated as empty.
pub const EPSILON: f64 = 1e-9;

/// Name given to the matching worker thread.
pub const WORKER_THREAD_NAME: &str = "point-match";
