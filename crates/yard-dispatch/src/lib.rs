//! `yard-dispatch` — launches the fleet and waits for every train.
//!
//! # Run model
//!
//! ```text
//! DispatcherBuilder::build
//!   ① validate YardConfig
//!   ② RouteTable::new(yard, switch_count)      — immutable from here on
//!   ③ truncate fleet to max_trains            — the rest are skipped
//!
//! Dispatcher::start
//!   ④ one VehicleAgent per entry, spawned on a JoinSet
//!   ⑤ each task waits for one of `worker_slots` semaphore permits
//!
//! RunningDispatch::join
//!   ⑥ collect every task: outcome, or a TaskFailure if it was cancelled,
//!      panicked, or errored; failures never disturb other trains
//! ```
//!
//! There is no global timeout: a train with a valid route retries until it
//! departs.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let report = DispatcherBuilder::new(YardConfig::default(), fleet, yard)
//!     .observer(NarrationObserver::stdout())
//!     .build()?
//!     .run()
//!     .await;
//! println!("{} dispatched", report.dispatched().count());
//! ```

pub mod builder;
pub mod dispatcher;
pub mod error;
pub mod report;


pub use builder::DispatcherBuilder;
pub use dispatcher::{Dispatcher, RunningDispatch};
pub use error::{DispatchError, DispatchResult};
pub use report::{DispatchReport, FailureKind, TaskFailure};
