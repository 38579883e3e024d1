//! Progress reporting for long-running stages.

/// A `(completed, total)` progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Whole percentage, exactly 100 once every unit is done.
    ///
    /// An empty stage counts as complete.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.completed.min(self.total) * 100 / self.total
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

/// Receives progress events.
pub trait ProgressSink {
    fn report(&mut self, progress: Progress);
}

impl<F: FnMut(Progress)> ProgressSink for F {
    fn report(&mut self, progress: Progress) {
        self(progress)
    }
}
