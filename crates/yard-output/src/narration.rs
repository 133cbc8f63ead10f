//! `NarrationObserver<W>` — the console narration of a yard run.
//!
//! Each hook formats its whole message first and writes it under one lock, so
//! lines from concurrent trains never interleave mid-message.

use std::fmt::Write as _;
use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use yard_agent::{ReleaseReason, RunSummary, YardObserver};
use yard_core::{RouteStep, SwitchId, TrainId};
use yard_layout::{FleetEntry, RouteRecord};

/// Writes human-readable progress lines to `W`.
///
/// Write errors are stored (first one wins) and returned by
/// [`take_error`][Self::take_error].
pub struct NarrationObserver<W: Write + Send> {
    out:        Mutex<W>,
    last_error: Mutex<Option<io::Error>>,
}

impl NarrationObserver<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> NarrationObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out:        Mutex::new(out),
            last_error: Mutex::new(None),
        }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&self) -> Option<io::Error> {
        self.last_error.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, text: &str) {
        let result = {
            let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
            out.write_all(text.as_bytes()).and_then(|()| out.flush())
        };
        if let Err(e) = result {
            let mut slot = self.last_error.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.is_none() {
                *slot = Some(e);
            }
        }
    }
}

impl<W: Write + Send> YardObserver for NarrationObserver<W> {
    fn on_simulation_start(&self, _trains: usize) {
        self.emit("$ $ $ TRAIN MOVEMENT SIMULATION BEGINS........... $ $ $\n");
    }

    fn on_no_route(&self, entry: &FleetEntry) {
        self.emit(&format!(
            "*************\n{} is on permanent hold and cannot be dispatched.\n*************\n",
            entry.train
        ));
    }

    fn on_acquired(&self, train: TrainId, _step: RouteStep, switch: SwitchId) {
        self.emit(&format!("{train} HOLDS LOCK on {switch}.\n"));
    }

    fn on_acquire_failed(&self, train: TrainId, step: RouteStep, switch: SwitchId, held: &[SwitchId]) {
        let mut text = format!("{train} UNABLE TO LOCK {step} required switch: {switch}.");
        match held {
            [] => {}
            [first] => {
                let _ = write!(text, "\n{train} Releasing lock on first required switch: {first}.");
            }
            [first, second, ..] => {
                let _ = write!(
                    text,
                    "\n{train} Releasing locks on first and second required switches: {first} and {second}."
                );
            }
        }
        text.push_str(" Train will wait...\n");
        self.emit(&text);
    }

    fn on_released(&self, train: TrainId, switch: SwitchId, reason: ReleaseReason) {
        match reason {
            ReleaseReason::Departure => {
                self.emit(&format!("{train}: Unlocks/releases lock on {switch}.\n"));
            }
            ReleaseReason::Abandoned => {
                self.emit(&format!("{train}: Interrupted. Lock on {switch} released.\n"));
            }
            // Narrated with the UNABLE TO LOCK message.
            ReleaseReason::Retreat => {}
        }
    }

    fn on_movement_begins(&self, train: TrainId, _route: &RouteRecord) {
        self.emit(&format!(
            "\n{train}: HOLDS ALL NEEDED SWITCH LOCKS - Train movement begins.\n"
        ));
    }

    fn on_clear_of_yard(&self, train: TrainId) {
        self.emit(&format!(
            "\n{train}: Clear of yard control.\n{train}: Releasing all switch locks.\n"
        ));
    }

    fn on_dispatched(&self, entry: &FleetEntry, _route: &RouteRecord, _attempts: u32) {
        let train = entry.train;
        self.emit(&format!(
            "{train}: Has been dispatched and moves on down the line out of yard control into CTC.\n\
             @ @ @ TRAIN {}: DISPATCHED @ @ @\n",
            train.0
        ));
    }

    fn on_task_failed(&self, train: TrainId, reason: &str) {
        self.emit(&format!("!!! {train}: dispatch aborted ({reason}).\n"));
    }

    fn on_simulation_end(&self, _summary: &RunSummary) {
        self.emit("\n$ $ $ SIMULATION ENDS $ $ $\n");
    }
}
