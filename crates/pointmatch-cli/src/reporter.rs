use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use pointmatch_core::matching::{MatchStage, ProgressReporter};

/// Spinner that shows the current match stage.
pub struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Self { bar })
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn begin_stage(&self, stage: MatchStage) {
        self.bar.set_message(stage.to_string());
    }
}
