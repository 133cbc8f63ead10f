//! `TracingObserver` — every vehicle event as a structured `tracing` event.

use std::time::Duration;

use tracing::{debug, info, warn};

use yard_agent::{ReleaseReason, RunSummary, YardObserver};
use yard_core::{RouteStep, SwitchId, TrainId};
use yard_layout::{FleetEntry, RouteRecord};

/// Logs dispatches, halts, and failures at `info`/`warn`; lock traffic at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl YardObserver for TracingObserver {
    fn on_simulation_start(&self, trains: usize) {
        info!(trains, "dispatch started");
    }

    fn on_route_found(&self, entry: &FleetEntry, route: &RouteRecord) {
        debug!(
            train = entry.train.0,
            switches = ?route.switches.map(|s| s.0),
            "route found"
        );
    }

    fn on_no_route(&self, entry: &FleetEntry) {
        info!(
            train = entry.train.0,
            inbound = entry.inbound.0,
            outbound = entry.outbound.0,
            "no route; permanent hold"
        );
    }

    fn on_acquired(&self, train: TrainId, step: RouteStep, switch: SwitchId) {
        debug!(train = train.0, %step, switch = switch.0, "switch locked");
    }

    fn on_acquire_failed(&self, train: TrainId, step: RouteStep, switch: SwitchId, held: &[SwitchId]) {
        debug!(
            train = train.0,
            %step,
            switch = switch.0,
            releasing = held.len(),
            "switch lock timed out"
        );
    }

    fn on_released(&self, train: TrainId, switch: SwitchId, reason: ReleaseReason) {
        debug!(train = train.0, switch = switch.0, ?reason, "switch released");
    }

    fn on_backoff(&self, train: TrainId, delay: Duration, attempt: u32) {
        debug!(train = train.0, attempt, delay_ms = delay.as_millis() as u64, "backing off");
    }

    fn on_movement_begins(&self, train: TrainId, _route: &RouteRecord) {
        debug!(train = train.0, "movement begins");
    }

    fn on_dispatched(&self, entry: &FleetEntry, _route: &RouteRecord, attempts: u32) {
        info!(train = entry.train.0, attempts, "dispatched");
    }

    fn on_task_failed(&self, train: TrainId, reason: &str) {
        warn!(train = train.0, reason, "vehicle task failed");
    }

    fn on_simulation_end(&self, summary: &RunSummary) {
        info!(
            dispatched = summary.dispatched,
            halted = summary.halted,
            failed = summary.failed,
            skipped = summary.skipped,
            "dispatch finished"
        );
    }
}
