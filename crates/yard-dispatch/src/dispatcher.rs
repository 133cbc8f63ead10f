//! The `Dispatcher` and its in-flight handle.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{AbortHandle, Id, JoinError, JoinSet};
use tokio::time::Instant;
use tracing::{info, warn};

use yard_agent::{AgentOutcome, VehicleAgent, YardObserver};
use yard_core::{TrainId, YardConfig};
use yard_layout::{FleetEntry, RouteTable};
use yard_lock::SwitchLockPool;

use crate::{DispatchError, DispatchReport, DispatchResult, FailureKind, TaskFailure};

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// A validated, ready-to-run simulation.
///
/// Create via [`DispatcherBuilder`][crate::DispatcherBuilder].
pub struct Dispatcher {
    pub(crate) config:   YardConfig,
    pub(crate) fleet:    Vec<FleetEntry>,
    pub(crate) routes:   Arc<RouteTable>,
    pub(crate) pool:     SwitchLockPool,
    pub(crate) observer: Arc<dyn YardObserver>,
    pub(crate) skipped:  usize,
}

impl Dispatcher {
    /// The entries that will be simulated (already capped).
    pub fn fleet(&self) -> &[FleetEntry] {
        &self.fleet
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn config(&self) -> &YardConfig {
        &self.config
    }

    /// Start every train and wait until each task has finished.
    pub async fn run(self) -> DispatchReport {
        self.start().join().await
    }

    /// Spawn one task per fleet entry and return immediately.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(self) -> RunningDispatch {
        let trains = self.fleet.len();
        info!(trains, skipped = self.skipped, "train movement simulation begins");
        self.observer.on_simulation_start(trains);

        let slots = Arc::new(Semaphore::new(self.config.worker_slots));
        let mut tasks = JoinSet::new();
        let mut by_task = HashMap::with_capacity(trains);
        let mut handles = HashMap::with_capacity(trains);

        for entry in self.fleet {
            let train = entry.train;
            let agent = VehicleAgent::new(
                entry,
                Arc::clone(&self.routes),
                self.pool.clone(),
                self.config.pacing,
                Arc::clone(&self.observer),
            );
            let slots = Arc::clone(&slots);

            let handle = tasks.spawn(async move {
                let _slot = slots
                    .acquire_owned()
                    .await
                    .map_err(|_| DispatchError::SlotsClosed)?;
                Ok::<_, DispatchError>(agent.run().await?)
            });
            by_task.insert(handle.id(), train);
            handles.insert(train, handle);
        }

        RunningDispatch {
            tasks,
            by_task,
            handles,
            pool:     self.pool,
            observer: self.observer,
            skipped:  self.skipped,
            started:  Instant::now(),
        }
    }
}

// ── RunningDispatch ───────────────────────────────────────────────────────────

/// Handle to a simulation in progress.
pub struct RunningDispatch {
    tasks:    JoinSet<DispatchResult<AgentOutcome>>,
    by_task:  HashMap<Id, TrainId>,
    handles:  HashMap<TrainId, AbortHandle>,
    pool:     SwitchLockPool,
    observer: Arc<dyn YardObserver>,
    skipped:  usize,
    started:  Instant,
}

impl RunningDispatch {
    /// The lock pool shared by the running trains.
    pub fn pool(&self) -> &SwitchLockPool {
        &self.pool
    }

    /// Cancel `train`'s task at its next suspension point.
    ///
    /// Any switches it holds are released as the task unwinds.  The train is
    /// reported as a [`FailureKind::Cancelled`] failure unless it had already
    /// finished.  Returns `false` if no task was started for `train`.
    pub fn abort(&self, train: TrainId) -> bool {
        match self.handles.get(&train) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Wait for every task to reach a terminal or failed state.
    pub async fn join(mut self) -> DispatchReport {
        let mut report = DispatchReport { skipped: self.skipped, ..DispatchReport::default() };

        while let Some(joined) = self.tasks.join_next_with_id().await {
            match joined {
                Ok((_, Ok(outcome))) => report.outcomes.push(outcome),
                Ok((id, Err(e))) => {
                    report.failures.push(self.fail(id, FailureKind::Error(e.to_string())));
                }
                Err(e) => {
                    let failure = self.fail(e.id(), failure_kind(&e));
                    report.failures.push(failure);
                }
            }
        }

        report.outcomes.sort_by_key(|o| o.entry.train);
        report.failures.sort_by_key(|f| f.train);
        report.elapsed = self.started.elapsed();

        let summary = report.summary();
        info!(
            dispatched = summary.dispatched,
            halted = summary.halted,
            failed = summary.failed,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "simulation ends"
        );
        self.observer.on_simulation_end(&summary);
        report
    }

    fn fail(&self, id: Id, kind: FailureKind) -> TaskFailure {
        let train = self.by_task.get(&id).copied().unwrap_or(TrainId::INVALID);
        let reason = kind.to_string();
        warn!(train = train.0, %reason, "vehicle task failed");
        self.observer.on_task_failed(train, &reason);
        TaskFailure { train, kind }
    }
}

fn failure_kind(e: &JoinError) -> FailureKind {
    if e.is_cancelled() {
        FailureKind::Cancelled
    } else {
        FailureKind::Panicked
    }
}
