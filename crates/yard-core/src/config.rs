//! Run configuration and simulation pacing.
//!
//! # Design
//!
//! Every delay in the simulator is pacing, not physics: the values below are
//! chosen so a human can follow the narration.  None of them is load-bearing
//! for correctness beyond two rules enforced by [`YardConfig::validate`]:
//!
//! - every duration is non-zero, so each retry round makes progress in time;
//! - the per-switch timeouts strictly decrease, so an agent that already
//!   holds switches gives up on the later ones faster than it waited for
//!   the first.

use std::time::Duration;

use crate::{RouteStep, YardError, YardResult};

// ── Pacing ────────────────────────────────────────────────────────────────────

/// Timeouts and delays that drive one vehicle's acquisition loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// Bounded wait for the route's first switch.  Default: 200 ms.
    pub first_switch_timeout:  Duration,
    /// Bounded wait for the second switch while holding the first.  Default: 100 ms.
    pub second_switch_timeout: Duration,
    /// Bounded wait for the third switch while holding two.  Default: 50 ms.
    pub third_switch_timeout:  Duration,
    /// Pause after a failed full-route attempt.  Default: 1000 ms.
    pub backoff_delay:         Duration,
    /// Time spent crossing the yard while holding all three switches.  Default: 400 ms.
    pub transit_delay:         Duration,
}

impl Pacing {
    /// Timeout applied when acquiring the switch at `step`.
    #[inline]
    pub fn timeout_for(&self, step: RouteStep) -> Duration {
        match step {
            RouteStep::First  => self.first_switch_timeout,
            RouteStep::Second => self.second_switch_timeout,
            RouteStep::Third  => self.third_switch_timeout,
        }
    }

    /// Longest time an agent can hold a contested switch before it either
    /// departs or lets go: the remaining step timeouts plus transit.
    pub fn max_hold(&self) -> Duration {
        self.second_switch_timeout + self.third_switch_timeout + self.transit_delay
    }

    pub fn validate(&self) -> YardResult<()> {
        let named = [
            ("first_switch_timeout",  self.first_switch_timeout),
            ("second_switch_timeout", self.second_switch_timeout),
            ("third_switch_timeout",  self.third_switch_timeout),
            ("backoff_delay",         self.backoff_delay),
            ("transit_delay",         self.transit_delay),
        ];
        if let Some((name, _)) = named.iter().find(|(_, d)| d.is_zero()) {
            return Err(YardError::Config(format!("{name} must be non-zero")));
        }
        if !(self.first_switch_timeout > self.second_switch_timeout
            && self.second_switch_timeout > self.third_switch_timeout)
        {
            return Err(YardError::Config(format!(
                "switch timeouts must strictly decrease, got {:?} / {:?} / {:?}",
                self.first_switch_timeout, self.second_switch_timeout, self.third_switch_timeout,
            )));
        }
        Ok(())
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            first_switch_timeout:  Duration::from_millis(200),
            second_switch_timeout: Duration::from_millis(100),
            third_switch_timeout:  Duration::from_millis(50),
            backoff_delay:         Duration::from_millis(1_000),
            transit_delay:         Duration::from_millis(400),
        }
    }
}

// ── YardConfig ────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically built from defaults plus a JSON file and CLI overrides by the
/// application crate, then handed to the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YardConfig {
    /// Fleet-size cap.  Entries past this index are not simulated.  Default: 30.
    pub max_trains: usize,

    /// Concurrent execution slots shared by all vehicle tasks.  Default: 30.
    pub worker_slots: usize,

    /// Highest switch id in the yard; the lock pool has `switch_count + 1`
    /// slots with slot 0 reserved.  Default: 10.
    pub switch_count: u32,

    pub pacing: Pacing,
}

impl YardConfig {
    pub const DEFAULT_MAX_TRAINS:   usize = 30;
    pub const DEFAULT_SWITCH_COUNT: u32   = 10;

    pub fn validate(&self) -> YardResult<()> {
        if self.max_trains == 0 {
            return Err(YardError::Config("max_trains must be at least 1".into()));
        }
        if self.worker_slots == 0 {
            return Err(YardError::Config("worker_slots must be at least 1".into()));
        }
        if self.switch_count == 0 {
            return Err(YardError::Config("switch_count must be at least 1".into()));
        }
        self.pacing.validate()
    }
}

impl Default for YardConfig {
    fn default() -> Self {
        Self {
            max_trains:   Self::DEFAULT_MAX_TRAINS,
            worker_slots: Self::DEFAULT_MAX_TRAINS,
            switch_count: Self::DEFAULT_SWITCH_COUNT,
            pacing:       Pacing::default(),
        }
    }
}
