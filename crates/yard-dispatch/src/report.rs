//! End-of-run report.

use std::fmt;
use std::time::Duration;

use yard_agent::{AgentOutcome, RunSummary};
use yard_core::TrainId;

/// How a vehicle task ended abnormally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The task was aborted while suspended (waiting, backing off, or in transit).
    Cancelled,
    Panicked,
    /// The task returned an error.
    Error(String),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Cancelled => f.write_str("cancelled"),
            FailureKind::Panicked  => f.write_str("panicked"),
            FailureKind::Error(e)  => write!(f, "error: {e}"),
        }
    }
}

/// A train whose task did not reach `Dispatched` or `Halted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub train: TrainId,
    pub kind:  FailureKind,
}

/// Everything the dispatcher observed, once all tasks have finished.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Terminal outcomes in ascending `TrainId` order.
    pub outcomes: Vec<AgentOutcome>,
    /// Abnormal task terminations in ascending `TrainId` order.
    pub failures: Vec<TaskFailure>,
    /// Fleet entries beyond the cap that were never simulated.
    pub skipped:  usize,
    /// Run time on the tokio clock (virtual under a paused test clock).
    pub elapsed:  Duration,
}

impl DispatchReport {
    pub fn dispatched(&self) -> impl Iterator<Item = &AgentOutcome> {
        self.outcomes.iter().filter(|o| o.is_dispatched())
    }

    pub fn halted(&self) -> impl Iterator<Item = &AgentOutcome> {
        self.outcomes.iter().filter(|o| o.is_halted())
    }

    pub fn outcome(&self, train: TrainId) -> Option<&AgentOutcome> {
        self.outcomes.iter().find(|o| o.entry.train == train)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            trains:     self.outcomes.len() + self.failures.len(),
            dispatched: self.dispatched().count(),
            halted:     self.halted().count(),
            failed:     self.failures.len(),
            skipped:    self.skipped,
        }
    }
}
