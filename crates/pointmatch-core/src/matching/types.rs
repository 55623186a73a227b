/// Point-match processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStage {
    LoadingSample,
    LoadingImage,
    Convolving,
    ScanningMaxima,
    Ranking,
}

impl std::fmt::Display for MatchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadingSample => write!(f, "Loading sample"),
            Self::LoadingImage => write!(f, "Loading image"),
            Self::Convolving => write!(f, "Correlating"),
            Self::ScanningMaxima => write!(f, "Scanning for maxima"),
            Self::Ranking => write!(f, "Ranking matches"),
        }
    }
}

/// Thread-safe progress reporting for a match run.
///
/// Implementors can use this to drive spinners, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started.
    fn begin_stage(&self, _stage: MatchStage) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `find_matches` delegates.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
