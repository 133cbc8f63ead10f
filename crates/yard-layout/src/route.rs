//! Yard routes and the read-only `(inbound, outbound)` lookup.

use yard_core::{RouteStep, SwitchId, TrackId, YardError};

use crate::{LayoutError, LayoutResult};

#[cfg(feature = "fx-hash")]
type RouteIndex = rustc_hash::FxHashMap<(TrackId, TrackId), usize>;
#[cfg(not(feature = "fx-hash"))]
type RouteIndex = std::collections::HashMap<(TrackId, TrackId), usize>;

// ── RouteRecord ───────────────────────────────────────────────────────────────

/// A legal path through the yard: the three switches a vehicle must hold,
/// in acquisition order, to get from `inbound` to `outbound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteRecord {
    pub inbound:  TrackId,
    pub switches: [SwitchId; 3],
    pub outbound: TrackId,
}

impl RouteRecord {
    pub fn new(inbound: TrackId, switches: [SwitchId; 3], outbound: TrackId) -> Self {
        Self { inbound, switches, outbound }
    }

    #[inline]
    pub fn switch(&self, step: RouteStep) -> SwitchId {
        self.switches[step.index()]
    }

    #[inline]
    pub fn first(&self) -> SwitchId {
        self.switch(RouteStep::First)
    }

    #[inline]
    pub fn second(&self) -> SwitchId {
        self.switch(RouteStep::Second)
    }

    #[inline]
    pub fn third(&self) -> SwitchId {
        self.switch(RouteStep::Third)
    }

    /// `(step, switch)` pairs in acquisition order.
    pub fn steps(&self) -> impl Iterator<Item = (RouteStep, SwitchId)> + '_ {
        RouteStep::ALL.into_iter().map(|step| (step, self.switch(step)))
    }
}

// ── RouteTable ────────────────────────────────────────────────────────────────

/// Immutable set of yard routes, indexed by `(inbound, outbound)`.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
    index:   RouteIndex,
}

impl RouteTable {
    /// Validate `records` against the yard's switch range and build the index.
    ///
    /// Every switch must lie in `1..=switch_count`, and no route may name the
    /// same switch twice (switch locks are not re-entrant, so such a route
    /// could never be acquired).  When two records share an
    /// `(inbound, outbound)` pair the first one is used for lookups.
    pub fn new(records: Vec<RouteRecord>, switch_count: u32) -> LayoutResult<Self> {
        let mut index = RouteIndex::default();

        for (i, r) in records.iter().enumerate() {
            for (step, switch) in r.steps() {
                if switch == SwitchId::RESERVED || switch.0 > switch_count {
                    return Err(YardError::SwitchOutOfRange(switch).into());
                }
                if r.switches[..step.index()].contains(&switch) {
                    return Err(LayoutError::RepeatedSwitch {
                        inbound:  r.inbound,
                        outbound: r.outbound,
                        switch,
                    });
                }
            }

            let key = (r.inbound, r.outbound);
            if index.contains_key(&key) {
                tracing::warn!(
                    inbound = r.inbound.0,
                    outbound = r.outbound.0,
                    "duplicate yard route ignored; first record wins"
                );
            } else {
                index.insert(key, i);
            }
        }

        Ok(Self { records, index })
    }

    /// Exact-match lookup.  Both tracks must match the same record.
    pub fn find_route(&self, inbound: TrackId, outbound: TrackId) -> Option<&RouteRecord> {
        self.index
            .get(&(inbound, outbound))
            .map(|&i| &self.records[i])
    }

    /// All records in load order, including shadowed duplicates.
    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
