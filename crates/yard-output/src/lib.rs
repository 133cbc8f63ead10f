//! `yard-output` — observers that turn vehicle events into output.
//!
//! | Observer              | Output                                               |
//! |-----------------------|------------------------------------------------------|
//! | [`NarrationObserver`] | human-readable progress lines on any `io::Write`     |
//! | [`TracingObserver`]   | structured `tracing` events                          |
//! | [`DepartureLog`]      | `departures.csv`, one row per dispatched train       |
//!
//! All three implement `yard_agent::YardObserver` and can be combined with
//! `YardObserverExt::and`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use yard_agent::YardObserverExt;
//! use yard_output::{DepartureLog, NarrationObserver, TracingObserver};
//!
//! let log = Arc::new(DepartureLog::create(Path::new("departures.csv"))?);
//! let observer = NarrationObserver::stdout().and(TracingObserver).and(log.clone());
//! let report = DispatcherBuilder::new(config, fleet, yard).observer(observer).build()?.run().await;
//! log.take_error().map(|e| eprintln!("output error: {e}"));
//! ```
//!
//! Observer hooks cannot return errors, so write failures are stored and
//! retrieved afterwards with `take_error`.

pub mod departures;
pub mod error;
pub mod narration;
pub mod row;
pub mod trace;


pub use departures::DepartureLog;
pub use error::{OutputError, OutputResult};
pub use narration::NarrationObserver;
pub use row::DepartureRow;
pub use trace::TracingObserver;
