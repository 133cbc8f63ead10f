//! Seeded synthetic fleets.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use yard_core::{TrackId, TrainId};
use yard_layout::{FleetEntry, RouteRecord};

/// `count` trains numbered from 1, each with an inbound track drawn from the
/// yard's inbound tracks and an outbound track drawn from its outbound tracks.
///
/// Pairs are drawn independently, so some trains may have no route and end up
/// on permanent hold.  The same `seed` and `yard` always give the same fleet.
pub fn random_fleet(count: u32, yard: &[RouteRecord], seed: u64) -> Vec<FleetEntry> {
    let mut inbound: Vec<TrackId> = yard.iter().map(|r| r.inbound).collect();
    let mut outbound: Vec<TrackId> = yard.iter().map(|r| r.outbound).collect();
    inbound.sort_unstable();
    inbound.dedup();
    outbound.sort_unstable();
    outbound.dedup();

    if inbound.is_empty() {
        return Vec::new();
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    (1..=count)
        .filter_map(|n| {
            let i = *inbound.choose(&mut rng)?;
            let o = *outbound.choose(&mut rng)?;
            Some(FleetEntry::new(TrainId(n), i, o))
        })
        .collect()
}
