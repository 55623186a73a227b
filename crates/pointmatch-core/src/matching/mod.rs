pub mod algorithm;
pub mod config;
pub mod convolution;
pub mod filter;
pub mod maxima;
pub mod sample;
pub mod target;
mod types;
pub mod worker;

pub use algorithm::{compute_surface, find_matches, find_matches_reported};
pub use config::PointMatchConfig;
pub use convolution::{correlation_at, CorrelationSurface};
pub use sample::TemplateExtent;
pub use types::{MatchStage, NoOpReporter, ProgressReporter};
pub use worker::{spawn_point_match, MatchJob, MatchRequest};
