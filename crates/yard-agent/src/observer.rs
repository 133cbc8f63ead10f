//! Observer hooks for progress narration and data collection.

use std::sync::Arc;
use std::time::Duration;

use yard_core::{RouteStep, SwitchId, TrainId};
use yard_layout::{FleetEntry, RouteRecord};

use crate::RunSummary;

/// Why a switch is being handed back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReleaseReason {
    /// A later switch timed out; the held prefix is given up before back-off.
    Retreat,
    /// Transit finished; the train is leaving yard control.
    Departure,
    /// The vehicle task was aborted or panicked while holding the switch.
    Abandoned,
}

/// Callbacks invoked by vehicle tasks and the dispatcher.
///
/// Every vehicle runs on its own task, so hooks take `&self` and may be called
/// concurrently.  Ordering between trains is whatever the scheduler produced.
/// For a single train the order is fixed: `on_released` for a switch always
/// precedes the moment the switch becomes available to anyone else, and
/// `on_acquired` always follows the moment it was taken.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — dispatch counter
///
/// ```rust,ignore
/// struct Counter(AtomicUsize);
///
/// impl YardObserver for Counter {
///     fn on_dispatched(&self, _e: &FleetEntry, _r: &RouteRecord, _attempts: u32) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait YardObserver: Send + Sync {
    /// Called once by the dispatcher before any vehicle task runs.
    fn on_simulation_start(&self, _trains: usize) {}

    fn on_route_found(&self, _entry: &FleetEntry, _route: &RouteRecord) {}

    /// The train's `(inbound, outbound)` pair matches no yard route.  Reported
    /// once; the train is permanently held.
    fn on_no_route(&self, _entry: &FleetEntry) {}

    fn on_acquired(&self, _train: TrainId, _step: RouteStep, _switch: SwitchId) {}

    /// Acquisition of `switch` at `step` timed out.  `held` is the prefix the
    /// train is about to release (empty when the first step failed).
    fn on_acquire_failed(
        &self,
        _train:  TrainId,
        _step:   RouteStep,
        _switch: SwitchId,
        _held:   &[SwitchId],
    ) {}

    fn on_released(&self, _train: TrainId, _switch: SwitchId, _reason: ReleaseReason) {}

    /// The train holds nothing and will wait `delay` before attempt `attempt + 1`.
    fn on_backoff(&self, _train: TrainId, _delay: Duration, _attempt: u32) {}

    /// All three switches are held; transit starts now.
    fn on_movement_begins(&self, _train: TrainId, _route: &RouteRecord) {}

    /// Transit finished; the departure releases follow.
    fn on_clear_of_yard(&self, _train: TrainId) {}

    /// Terminal success: switches released and completion flag set.
    fn on_dispatched(&self, _entry: &FleetEntry, _route: &RouteRecord, _attempts: u32) {}

    /// The train's task ended abnormally (cancelled, panicked, or errored).
    fn on_task_failed(&self, _train: TrainId, _reason: &str) {}

    /// Called once after every task reached a terminal or failed state.
    fn on_simulation_end(&self, _summary: &RunSummary) {}
}

/// A [`YardObserver`] that does nothing.
pub struct NoopObserver;

impl YardObserver for NoopObserver {}

impl<T: YardObserver + ?Sized> YardObserver for Arc<T> {
    fn on_simulation_start(&self, trains: usize) {
        (**self).on_simulation_start(trains)
    }
    fn on_route_found(&self, entry: &FleetEntry, route: &RouteRecord) {
        (**self).on_route_found(entry, route)
    }
    fn on_no_route(&self, entry: &FleetEntry) {
        (**self).on_no_route(entry)
    }
    fn on_acquired(&self, train: TrainId, step: RouteStep, switch: SwitchId) {
        (**self).on_acquired(train, step, switch)
    }
    fn on_acquire_failed(&self, train: TrainId, step: RouteStep, switch: SwitchId, held: &[SwitchId]) {
        (**self).on_acquire_failed(train, step, switch, held)
    }
    fn on_released(&self, train: TrainId, switch: SwitchId, reason: ReleaseReason) {
        (**self).on_released(train, switch, reason)
    }
    fn on_backoff(&self, train: TrainId, delay: Duration, attempt: u32) {
        (**self).on_backoff(train, delay, attempt)
    }
    fn on_movement_begins(&self, train: TrainId, route: &RouteRecord) {
        (**self).on_movement_begins(train, route)
    }
    fn on_clear_of_yard(&self, train: TrainId) {
        (**self).on_clear_of_yard(train)
    }
    fn on_dispatched(&self, entry: &FleetEntry, route: &RouteRecord, attempts: u32) {
        (**self).on_dispatched(entry, route, attempts)
    }
    fn on_task_failed(&self, train: TrainId, reason: &str) {
        (**self).on_task_failed(train, reason)
    }
    fn on_simulation_end(&self, summary: &RunSummary) {
        (**self).on_simulation_end(summary)
    }
}

// ── Chained observer ──────────────────────────────────────────────────────────

/// Forwards every event to two observers, `first` then `second`.
///
/// Construct chains with `observer_a.and(observer_b)`.
pub struct ChainedObserver<A: YardObserver, B: YardObserver> {
    first:  A,
    second: B,
}

impl<A: YardObserver, B: YardObserver> YardObserver for ChainedObserver<A, B> {
    fn on_simulation_start(&self, trains: usize) {
        self.first.on_simulation_start(trains);
        self.second.on_simulation_start(trains);
    }
    fn on_route_found(&self, entry: &FleetEntry, route: &RouteRecord) {
        self.first.on_route_found(entry, route);
        self.second.on_route_found(entry, route);
    }
    fn on_no_route(&self, entry: &FleetEntry) {
        self.first.on_no_route(entry);
        self.second.on_no_route(entry);
    }
    fn on_acquired(&self, train: TrainId, step: RouteStep, switch: SwitchId) {
        self.first.on_acquired(train, step, switch);
        self.second.on_acquired(train, step, switch);
    }
    fn on_acquire_failed(&self, train: TrainId, step: RouteStep, switch: SwitchId, held: &[SwitchId]) {
        self.first.on_acquire_failed(train, step, switch, held);
        self.second.on_acquire_failed(train, step, switch, held);
    }
    fn on_released(&self, train: TrainId, switch: SwitchId, reason: ReleaseReason) {
        self.first.on_released(train, switch, reason);
        self.second.on_released(train, switch, reason);
    }
    fn on_backoff(&self, train: TrainId, delay: Duration, attempt: u32) {
        self.first.on_backoff(train, delay, attempt);
        self.second.on_backoff(train, delay, attempt);
    }
    fn on_movement_begins(&self, train: TrainId, route: &RouteRecord) {
        self.first.on_movement_begins(train, route);
        self.second.on_movement_begins(train, route);
    }
    fn on_clear_of_yard(&self, train: TrainId) {
        self.first.on_clear_of_yard(train);
        self.second.on_clear_of_yard(train);
    }
    fn on_dispatched(&self, entry: &FleetEntry, route: &RouteRecord, attempts: u32) {
        self.first.on_dispatched(entry, route, attempts);
        self.second.on_dispatched(entry, route, attempts);
    }
    fn on_task_failed(&self, train: TrainId, reason: &str) {
        self.first.on_task_failed(train, reason);
        self.second.on_task_failed(train, reason);
    }
    fn on_simulation_end(&self, summary: &RunSummary) {
        self.first.on_simulation_end(summary);
        self.second.on_simulation_end(summary);
    }
}

/// Extension trait that adds `.and(other)` to any `YardObserver`.
pub trait YardObserverExt: YardObserver + Sized {
    fn and<B: YardObserver>(self, other: B) -> ChainedObserver<Self, B> {
        ChainedObserver { first: self, second: other }
    }
}

impl<O: YardObserver + Sized> YardObserverExt for O {}
