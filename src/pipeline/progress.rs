use geninfo_traits::{Progress, ProgressSink};
use log::info;

/// Logs each progress event at `info`.
#[derive(Debug, Clone, Default)]
pub struct LogProgress {
    label: String,
}

impl LogProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl ProgressSink for LogProgress {
    fn report(&mut self, progress: Progress) {
        info!(
            "[{}%] {} {}/{}",
            progress.percent(),
            self.label,
            progress.completed,
            progress.total
        );
    }
}
