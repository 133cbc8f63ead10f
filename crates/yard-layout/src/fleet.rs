//! One vehicle waiting in the yard.

use std::collections::HashSet;

use yard_core::{TrackId, TrainId};

use crate::{LayoutError, LayoutResult};

/// A fleet-table row plus the vehicle's completion flag.
///
/// Owned by exactly one vehicle task for its whole life; never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetEntry {
    pub train:    TrainId,
    pub inbound:  TrackId,
    pub outbound: TrackId,
    completed:    bool,
}

impl FleetEntry {
    pub fn new(train: TrainId, inbound: TrackId, outbound: TrackId) -> Self {
        Self { train, inbound, outbound, completed: false }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flip the completion flag.
    ///
    /// Returns `true` only for the single false→true transition; later calls
    /// leave the flag set and return `false`.
    pub fn mark_completed(&mut self) -> bool {
        !std::mem::replace(&mut self.completed, true)
    }
}

/// Check that every train id is usable and unique.
///
/// Ids are positive, and `TrainId::INVALID` is the lock pool's "no holder"
/// marker, so both `0` and `u32::MAX` are rejected.
pub fn validate_fleet(fleet: &[FleetEntry]) -> LayoutResult<()> {
    let mut seen = HashSet::with_capacity(fleet.len());
    for entry in fleet {
        let train = entry.train;
        if train.0 == 0 || !train.is_valid() {
            return Err(LayoutError::InvalidTrain(train));
        }
        if !seen.insert(train) {
            return Err(LayoutError::DuplicateTrain(train));
        }
    }
    Ok(())
}
