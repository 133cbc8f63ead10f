//! CSV departure log.
//!
//! One row per dispatched train, in dispatch order:
//! `train_id,inbound,outbound,switch_1,switch_2,switch_3,attempts`.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use csv::Writer;

use yard_agent::{RunSummary, YardObserver};
use yard_layout::{FleetEntry, RouteRecord};

use crate::{DepartureRow, OutputError, OutputResult};

/// A [`YardObserver`] that records every dispatch as a CSV row.
///
/// Rows are flushed when the run ends.  Share it behind an `Arc` to read
/// [`take_error`][Self::take_error] after the dispatcher returns.
pub struct DepartureLog<W: Write + Send> {
    writer:     Mutex<Writer<W>>,
    last_error: Mutex<Option<OutputError>>,
}

impl DepartureLog<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Self::new(file)
    }
}

impl<W: Write + Send> DepartureLog<W> {
    pub fn new(out: W) -> OutputResult<Self> {
        let mut writer = Writer::from_writer(out);
        writer.write_record(DepartureRow::HEADER)?;
        Ok(Self {
            writer:     Mutex::new(writer),
            last_error: Mutex::new(None),
        })
    }

    /// Append one row.
    pub fn record(&self, row: &DepartureRow) -> OutputResult<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_record(row.to_record())?;
        Ok(())
    }

    pub fn finish(&self) -> OutputResult<()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner).flush()?;
        Ok(())
    }

    /// Take the first stored write error, if any.
    pub fn take_error(&self) -> Option<OutputError> {
        self.last_error.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// Flush and unwrap the underlying writer.
    pub fn into_inner(self) -> OutputResult<W> {
        let writer = self.writer.into_inner().unwrap_or_else(PoisonError::into_inner);
        writer.into_inner().map_err(|e| OutputError::Io(e.into_error()))
    }

    fn store_err(&self, result: OutputResult<()>) {
        if let Err(e) = result {
            let mut slot = self.last_error.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.is_none() {
                *slot = Some(e);
            }
        }
    }
}

impl<W: Write + Send> YardObserver for DepartureLog<W> {
    fn on_dispatched(&self, entry: &FleetEntry, route: &RouteRecord, attempts: u32) {
        let result = self.record(&DepartureRow::new(entry, route, attempts));
        self.store_err(result);
    }

    fn on_simulation_end(&self, _summary: &RunSummary) {
        let result = self.finish();
        self.store_err(result);
    }
}
