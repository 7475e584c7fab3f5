use std::time::Duration;

/// Periodic keep-alive snapshot emitted while a species is being annotated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub processed: usize,
    pub total: usize,
    pub modified: usize,
    /// Time since the previous checkpoint (or the start of the run).
    pub since_last: Duration,
    pub elapsed: Duration,
}

impl Checkpoint {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        100.0 * self.processed as f64 / self.total as f64
    }

    /// Remaining time, extrapolated from the mean time per protein so far.
    pub fn remaining(&self) -> Duration {
        if self.processed == 0 {
            return Duration::ZERO;
        }
        let per_protein = self.elapsed.as_secs_f64() / self.processed as f64;
        let left = self.total.saturating_sub(self.processed) as f64;
        Duration::from_secs_f64(per_protein * left)
    }
}

#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Checkpoint(Checkpoint),
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
