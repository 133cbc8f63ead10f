//! `yard-agent` — one concurrent task per vehicle.
//!
//! # State machine
//!
//! ```text
//! Routing ──no route──► Halted                       (terminal, never retried)
//!    │
//!    └─route found──► Waiting ◄──────────────┐
//!                        │                   │ release held prefix,
//!                        │ acquire 1st,2nd,3rd│ back off
//!                        │ (200/100/50 ms)    │
//!                        ├──any step times out┘
//!                        │
//!                        └─all three held──► Holding ──transit──► Dispatched
//! ```
//!
//! At every instant an agent holds a prefix of its route (none, first,
//! first+second, all three).  A failed step releases the prefix before the
//! back-off, which is what rules out circular waits: nobody keeps a switch
//! for longer than [`Pacing::max_hold`][yard_core::Pacing::max_hold].
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`agent`]    | `VehicleAgent`, `AgentState`                          |
//! | [`observer`] | `YardObserver` trait, `NoopObserver`, `ChainedObserver` |
//! | [`outcome`]  | `AgentOutcome`, `RunSummary`                          |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                        |

pub mod agent;
pub mod error;
pub mod observer;
pub mod outcome;


pub use agent::{AgentState, VehicleAgent};
pub use error::{AgentError, AgentResult};
pub use observer::{ChainedObserver, NoopObserver, ReleaseReason, YardObserver, YardObserverExt};
pub use outcome::{AgentOutcome, RunSummary};
