//! The per-vehicle acquisition / retry protocol.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use tracing::{Instrument, debug, trace};

use yard_core::{Pacing, SwitchId, TrainId};
use yard_layout::{FleetEntry, RouteRecord, RouteTable};
use yard_lock::{SwitchGuard, SwitchLockPool};

use crate::{AgentOutcome, AgentResult, ReleaseReason, YardObserver};

// ── AgentState ────────────────────────────────────────────────────────────────

/// Lifecycle of one vehicle.  `Dispatched` and `Halted` are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AgentState {
    /// Looking up the route for the train's track pair.
    Routing,
    /// Route known; cycling through acquire / release / back-off rounds.
    Waiting,
    /// All three switches held; crossing the yard.
    Holding,
    /// Left yard control.  Switches released, completion flag set.
    Dispatched,
    /// No route exists for the track pair.  Never retried.
    Halted,
}

impl AgentState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, AgentState::Dispatched | AgentState::Halted)
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AgentState::Routing    => "routing",
            AgentState::Waiting    => "waiting",
            AgentState::Holding    => "holding",
            AgentState::Dispatched => "dispatched",
            AgentState::Halted     => "halted",
        })
    }
}

// ── VehicleAgent ──────────────────────────────────────────────────────────────

/// One train's task.  Owns its [`FleetEntry`]; shares only the route table
/// (read-only) and the lock pool.
///
/// Create one per fleet entry and drive it with [`run`][Self::run], normally
/// on its own spawned task.
pub struct VehicleAgent {
    entry:    FleetEntry,
    routes:   Arc<RouteTable>,
    pool:     SwitchLockPool,
    pacing:   Pacing,
    observer: Arc<dyn YardObserver>,
    state:    AgentState,
    attempts: u32,
}

impl VehicleAgent {
    pub fn new(
        entry:    FleetEntry,
        routes:   Arc<RouteTable>,
        pool:     SwitchLockPool,
        pacing:   Pacing,
        observer: Arc<dyn YardObserver>,
    ) -> Self {
        Self {
            entry,
            routes,
            pool,
            pacing,
            observer,
            state:    AgentState::Routing,
            attempts: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[inline]
    pub fn entry(&self) -> &FleetEntry {
        &self.entry
    }

    /// Run the protocol to a terminal state.
    ///
    /// Returns `Err` only for lock-pool misuse (a switch outside the pool),
    /// which a validated [`RouteTable`] rules out.  Cancelling the future at
    /// any suspension point releases every held switch and reports each one
    /// with [`ReleaseReason::Abandoned`].
    pub async fn run(self) -> AgentResult<AgentOutcome> {
        let span = tracing::debug_span!("vehicle", train = self.entry.train.0);
        self.drive().instrument(span).await
    }

    async fn drive(mut self) -> AgentResult<AgentOutcome> {
        let Some(route) = self
            .routes
            .find_route(self.entry.inbound, self.entry.outbound)
            .copied()
        else {
            debug!(
                inbound = self.entry.inbound.0,
                outbound = self.entry.outbound.0,
                "no yard route; train held permanently"
            );
            self.transition(AgentState::Halted);
            self.observer.on_no_route(&self.entry);
            return Ok(self.into_outcome(None));
        };

        self.transition(AgentState::Waiting);
        self.observer.on_route_found(&self.entry, &route);

        let held = loop {
            self.attempts += 1;
            if let Some(held) = self.acquire_route(&route).await? {
                break held;
            }
            let delay = self.pacing.backoff_delay;
            self.observer.on_backoff(self.entry.train, delay, self.attempts);
            tokio::time::sleep(delay).await;
        };

        self.transition(AgentState::Holding);
        self.observer.on_movement_begins(self.entry.train, &route);
        tokio::time::sleep(self.pacing.transit_delay).await;

        self.observer.on_clear_of_yard(self.entry.train);
        held.release(ReleaseReason::Departure);

        let first_completion = self.entry.mark_completed();
        debug_assert!(first_completion, "train completed twice");
        self.transition(AgentState::Dispatched);
        self.observer.on_dispatched(&self.entry, &route, self.attempts);

        Ok(self.into_outcome(Some(route)))
    }

    /// One all-or-nothing attempt: acquire the route's switches in order with
    /// decreasing patience.  On the first timeout the held prefix is released
    /// and `None` is returned.
    async fn acquire_route(&self, route: &RouteRecord) -> AgentResult<Option<HeldSwitches>> {
        let train = self.entry.train;
        let mut held = HeldSwitches::new(train, Arc::clone(&self.observer));

        for (step, switch) in route.steps() {
            let timeout = self.pacing.timeout_for(step);
            match self.pool.try_acquire(switch, train, timeout).await? {
                Some(guard) => {
                    trace!(%step, switch = switch.0, "switch acquired");
                    held.push(guard);
                    self.observer.on_acquired(train, step, switch);
                }
                None => {
                    trace!(%step, switch = switch.0, attempt = self.attempts, "switch timed out");
                    self.observer.on_acquire_failed(train, step, switch, &held.switches());
                    held.release(ReleaseReason::Retreat);
                    return Ok(None);
                }
            }
        }
        Ok(Some(held))
    }

    fn transition(&mut self, next: AgentState) {
        debug!(from = %self.state, to = %next, "state change");
        self.state = next;
    }

    fn into_outcome(self, route: Option<RouteRecord>) -> AgentOutcome {
        debug_assert!(self.state.is_terminal());
        AgentOutcome {
            entry:    self.entry,
            state:    self.state,
            attempts: self.attempts,
            route,
        }
    }
}

// ── HeldSwitches ──────────────────────────────────────────────────────────────

/// The guards one agent holds, in acquisition order.
///
/// Every switch leaves through `on_released`.  Guards still held when this is
/// dropped (the task was aborted or panicked) are reported as `Abandoned`.
struct HeldSwitches {
    train:    TrainId,
    observer: Arc<dyn YardObserver>,
    guards:   Vec<SwitchGuard>,
}

impl HeldSwitches {
    fn new(train: TrainId, observer: Arc<dyn YardObserver>) -> Self {
        Self { train, observer, guards: Vec::with_capacity(3) }
    }

    fn push(&mut self, guard: SwitchGuard) {
        self.guards.push(guard);
    }

    fn switches(&self) -> Vec<SwitchId> {
        self.guards.iter().map(SwitchGuard::switch).collect()
    }

    fn release(mut self, reason: ReleaseReason) {
        self.release_each(reason);
    }

    fn release_each(&mut self, reason: ReleaseReason) {
        for guard in self.guards.drain(..) {
            self.observer.on_released(self.train, guard.switch(), reason);
            guard.release();
        }
    }
}

impl Drop for HeldSwitches {
    fn drop(&mut self) {
        if self.guards.is_empty() {
            return;
        }
        debug!(held = self.guards.len(), "vehicle interrupted holding switches");
        if !thread::panicking() {
            self.release_each(ReleaseReason::Abandoned);
            return;
        }
        // Already unwinding: a second observer panic would abort the process.
        for guard in self.guards.drain(..) {
            let (observer, train, switch) = (&self.observer, self.train, guard.switch());
            let _ = panic::catch_unwind(AssertUnwindSafe(|| {
                observer.on_released(train, switch, ReleaseReason::Abandoned);
            }));
            guard.release();
        }
    }
}
