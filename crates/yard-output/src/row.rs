//! Plain data row types written by output backends.

use yard_layout::{FleetEntry, RouteRecord};

/// One dispatched train.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartureRow {
    pub train_id: u32,
    pub inbound:  u32,
    pub outbound: u32,
    /// Switches in acquisition order.
    pub switches: [u32; 3],
    /// Full-route attempts, including the successful one.
    pub attempts: u32,
}

impl DepartureRow {
    pub const HEADER: [&'static str; 7] =
        ["train_id", "inbound", "outbound", "switch_1", "switch_2", "switch_3", "attempts"];

    pub fn new(entry: &FleetEntry, route: &RouteRecord, attempts: u32) -> Self {
        Self {
            train_id: entry.train.0,
            inbound:  entry.inbound.0,
            outbound: entry.outbound.0,
            switches: route.switches.map(|s| s.0),
            attempts,
        }
    }

    pub fn to_record(&self) -> [String; 7] {
        [
            self.train_id.to_string(),
            self.inbound.to_string(),
            self.outbound.to_string(),
            self.switches[0].to_string(),
            self.switches[1].to_string(),
            self.switches[2].to_string(),
            self.attempts.to_string(),
        ]
    }
}
