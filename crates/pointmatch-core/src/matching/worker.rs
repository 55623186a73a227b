use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::debug;

use crate::consts::WORKER_THREAD_NAME;
use crate::error::{PointMatchError, Result};
use crate::point::{MatchList, PixelPoint};
use crate::processed::ProcessedImage;

use super::algorithm::find_matches_reported;
use super::config::PointMatchConfig;
use super::types::ProgressReporter;

/// Owned inputs for one match run, moved onto the worker thread.
#[derive(Clone, Debug)]
pub struct MatchRequest {
    pub sample_point_pixels: Vec<PixelPoint>,
    pub image_processed: ProcessedImage,
    pub config: PointMatchConfig,
    pub points_existing: Vec<PixelPoint>,
}

/// Handle to a match run executing on its own thread.
///
/// A run cannot be interrupted. To cancel, drop the job; the thread finishes
/// on its own and its result is discarded.
pub struct MatchJob {
    handle: JoinHandle<Result<MatchList>>,
}

impl MatchJob {
    /// True once the worker has produced its result.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the run completes.
    pub fn join(self) -> Result<MatchList> {
        self.handle
            .join()
            .map_err(|_| PointMatchError::WorkerPanicked)?
    }
}

/// Spawn the worker thread for one match run.
pub fn spawn_point_match(
    request: MatchRequest,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<MatchJob> {
    let handle = std::thread::Builder::new()
        .name(WORKER_THREAD_NAME.into())
        .spawn(move || {
            debug!(
                samples = request.sample_point_pixels.len(),
                existing = request.points_existing.len(),
                "Point match worker started"
            );
            find_matches_reported(
                &request.sample_point_pixels,
                &request.image_processed,
                &request.config,
                &request.points_existing,
                reporter.as_ref(),
            )
        })?;

    Ok(MatchJob { handle })
}
