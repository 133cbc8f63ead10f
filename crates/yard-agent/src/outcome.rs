//! Terminal results of vehicle tasks.

use yard_layout::{FleetEntry, RouteRecord};

use crate::AgentState;

/// What a vehicle task returns once it reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOutcome {
    /// The fleet entry, with `is_completed()` set iff the train was dispatched.
    pub entry:    FleetEntry,
    /// `Dispatched` or `Halted`.
    pub state:    AgentState,
    /// Full-route acquisition attempts, including the successful one.
    /// Zero for a halted train.
    pub attempts: u32,
    pub route:    Option<RouteRecord>,
}

impl AgentOutcome {
    #[inline]
    pub fn is_dispatched(&self) -> bool {
        self.state == AgentState::Dispatched
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.state == AgentState::Halted
    }
}

/// End-of-run counts handed to [`YardObserver::on_simulation_end`][crate::YardObserver::on_simulation_end].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Vehicle tasks started.
    pub trains:     usize,
    pub dispatched: usize,
    pub halted:     usize,
    /// Tasks that were cancelled, panicked, or returned an error.
    pub failed:     usize,
    /// Fleet entries beyond the fleet-size cap that were never simulated.
    pub skipped:    usize,
}
