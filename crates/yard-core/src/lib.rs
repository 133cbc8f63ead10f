//! `yard-core` — foundational types for the marshalling-yard simulator.
//!
//! This crate is a dependency of every other `yard-*` crate.  It has no
//! `yard-*` dependencies and a single required external one (`thiserror`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `TrainId`, `TrackId`, `SwitchId`                        |
//! | [`step`]      | `RouteStep` — position of a switch in acquisition order |
//! | [`config`]    | `YardConfig`, `Pacing`                                  |
//! | [`error`]     | `YardError`, `YardResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the identifier types.    |

pub mod config;
pub mod error;
pub mod ids;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Pacing, YardConfig};
pub use error::{YardError, YardResult};
pub use ids::{SwitchId, TrackId, TrainId};
pub use step::RouteStep;
