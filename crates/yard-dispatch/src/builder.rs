//! Fluent builder for constructing a [`Dispatcher`].

use std::sync::Arc;

use tracing::warn;

use yard_agent::{NoopObserver, YardObserver};
use yard_core::YardConfig;
use yard_layout::{FleetEntry, RouteRecord, RouteTable, validate_fleet};
use yard_lock::SwitchLockPool;

use crate::{DispatchError, DispatchResult, Dispatcher};

/// Fluent builder for [`Dispatcher`].
///
/// # Required inputs
///
/// - [`YardConfig`] — fleet cap, worker slots, switch count, pacing
/// - the fleet table, in load order
/// - the yard table, in load order
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                   |
/// |------------------|-------------------------------------------|
/// | `.observer(o)`   | [`NoopObserver`]                          |
/// | `.pool(p)`       | `SwitchLockPool::new(config.switch_count)` |
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = DispatcherBuilder::new(config, fleet, yard)
///     .observer(TracingObserver)
///     .build()?;
/// ```
pub struct DispatcherBuilder {
    config:   YardConfig,
    fleet:    Vec<FleetEntry>,
    yard:     Vec<RouteRecord>,
    observer: Option<Arc<dyn YardObserver>>,
    pool:     Option<SwitchLockPool>,
}

impl DispatcherBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: YardConfig, fleet: Vec<FleetEntry>, yard: Vec<RouteRecord>) -> Self {
        Self {
            config,
            fleet,
            yard,
            observer: None,
            pool:     None,
        }
    }

    /// Receive narration and progress events from every vehicle task.
    pub fn observer<O: YardObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Share an existing lock pool instead of creating a fresh one.
    ///
    /// Its switch count must equal `config.switch_count`.
    pub fn pool(mut self, pool: SwitchLockPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Validate inputs, build the route table, and apply the fleet cap.
    ///
    /// Train ids must be unique and lie in `1..u32::MAX`.
    pub fn build(self) -> DispatchResult<Dispatcher> {
        self.config.validate()?;

        validate_fleet(&self.fleet)?;
        let routes = RouteTable::new(self.yard, self.config.switch_count)?;

        let pool = match self.pool {
            Some(p) if p.switch_count() != self.config.switch_count => {
                return Err(DispatchError::PoolMismatch {
                    expected: self.config.switch_count,
                    got:      p.switch_count(),
                });
            }
            Some(p) => p,
            None => SwitchLockPool::new(self.config.switch_count),
        };

        let mut fleet = self.fleet;
        let skipped = fleet.len().saturating_sub(self.config.max_trains);
        if skipped > 0 {
            warn!(
                max_trains = self.config.max_trains,
                skipped,
                "fleet exceeds the cap; trailing entries are not simulated"
            );
            fleet.truncate(self.config.max_trains);
        }

        Ok(Dispatcher {
            config:   self.config,
            fleet,
            routes:   Arc::new(routes),
            pool,
            observer: self.observer.unwrap_or_else(|| Arc::new(NoopObserver)),
            skipped,
        })
    }
}
