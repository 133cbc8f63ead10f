//! `yard-layout` — the two input tables and the immutable route lookup.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`fleet`]   | `FleetEntry`, `validate_fleet`                            |
//! | [`route`]   | `RouteRecord`, `RouteTable`                               |
//! | [`loader`]  | `load_fleet_csv`, `load_yard_csv` and `*_reader` variants |
//! | [`error`]   | `LayoutError`, `LayoutResult<T>`                          |
//!
//! # Input format
//!
//! Both tables are headerless, comma-separated integers:
//!
//! ```text
//! fleet:  train, inbound, outbound
//! yard:   inbound, switch_1, switch_2, switch_3, outbound
//! ```
//!
//! The `RouteTable` is built once and never mutated, so it is shared between
//! vehicle tasks behind an `Arc` with no synchronisation.

pub mod error;
pub mod fleet;
pub mod loader;
pub mod route;

#[cfg(test)]
mod tests;

pub use error::{LayoutError, LayoutResult};
pub use fleet::{FleetEntry, validate_fleet};
pub use loader::{load_fleet_csv, load_fleet_reader, load_yard_csv, load_yard_reader};
pub use route::{RouteRecord, RouteTable};
pub use yard_core::RouteStep;
