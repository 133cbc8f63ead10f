//! CSV loaders for the fleet and yard tables.
//!
//! # CSV format
//!
//! Headerless, one record per line, fields trimmed:
//!
//! ```csv
//! 1,1,8
//! 2,2,7
//! ```
//!
//! is a fleet of two trains (`train,inbound,outbound`), and
//!
//! ```csv
//! 1,1,5,6,8
//! 2,2,3,4,7
//! ```
//!
//! is a yard with two routes (`inbound,switch_1,switch_2,switch_3,outbound`).
//!
//! A row with the wrong number of fields or a non-numeric field is rejected
//! with [`LayoutError::Parse`] naming the line, so malformed input never
//! reaches the dispatcher.  Train ids must be unique and lie in
//! `1..u32::MAX`.  Blank lines are skipped.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use yard_core::{SwitchId, TrackId, TrainId};

use crate::fleet::validate_fleet;
use crate::{FleetEntry, LayoutError, LayoutResult, RouteRecord};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FleetRow {
    train:    u32,
    inbound:  u32,
    outbound: u32,
}

#[derive(Deserialize)]
struct YardRow {
    inbound:  u32,
    switch_1: u32,
    switch_2: u32,
    switch_3: u32,
    outbound: u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the fleet table from a CSV file, in file order.
pub fn load_fleet_csv(path: &Path) -> LayoutResult<Vec<FleetEntry>> {
    let file = std::fs::File::open(path).map_err(LayoutError::Io)?;
    load_fleet_reader(file)
}

/// Like [`load_fleet_csv`] but accepts any `Read` source.
pub fn load_fleet_reader<R: Read>(reader: R) -> LayoutResult<Vec<FleetEntry>> {
    let rows: Vec<FleetRow> = read_rows(reader, 3, "fleet")?;
    let fleet: Vec<FleetEntry> = rows
        .into_iter()
        .map(|r| FleetEntry::new(TrainId(r.train), TrackId(r.inbound), TrackId(r.outbound)))
        .collect();
    validate_fleet(&fleet)?;
    Ok(fleet)
}

/// Load the yard table from a CSV file, in file order.
///
/// Switch-range validation happens later, in
/// [`RouteTable::new`][crate::RouteTable::new], once the switch count is known.
pub fn load_yard_csv(path: &Path) -> LayoutResult<Vec<RouteRecord>> {
    let file = std::fs::File::open(path).map_err(LayoutError::Io)?;
    load_yard_reader(file)
}

/// Like [`load_yard_csv`] but accepts any `Read` source.
pub fn load_yard_reader<R: Read>(reader: R) -> LayoutResult<Vec<RouteRecord>> {
    let rows: Vec<YardRow> = read_rows(reader, 5, "yard")?;
    Ok(rows
        .into_iter()
        .map(|r| {
            RouteRecord::new(
                TrackId(r.inbound),
                [SwitchId(r.switch_1), SwitchId(r.switch_2), SwitchId(r.switch_3)],
                TrackId(r.outbound),
            )
        })
        .collect())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_rows<R: Read, T: DeserializeOwned>(
    reader: R,
    width:  usize,
    table:  &str,
) -> LayoutResult<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| LayoutError::Parse(format!("{table} table: {e}")))?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != width {
            return Err(LayoutError::Parse(format!(
                "{table} table line {line}: expected {width} fields, found {}",
                record.len()
            )));
        }
        let row = record
            .deserialize::<T>(None)
            .map_err(|e| LayoutError::Parse(format!("{table} table line {line}: {e}")))?;
        rows.push(row);
    }
    Ok(rows)
}
