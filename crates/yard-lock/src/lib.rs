//! `yard-lock` — the switch lock pool.
//!
//! # Model
//!
//! One exclusive lock per switch, addressed by [`SwitchId`][yard_core::SwitchId].
//! Slot 0 exists so ids index directly but is reserved and never handed out.
//!
//! ```text
//! try_acquire(switch, train, timeout)
//!   ├─ lock frees within timeout → Some(SwitchGuard)   holder = train
//!   └─ timeout elapses           → None                no side effects
//!
//! SwitchGuard::release() / drop                         holder cleared, lock freed
//! ```
//!
//! Waiting suspends only the calling task; the lock is a `tokio::sync::Mutex`,
//! which queues waiters first-come first-served.  Release consumes the guard,
//! so a task cannot release a switch it does not hold, and an aborted task
//! drops (and therefore releases) whatever it held.

pub mod error;
pub mod pool;

#[cfg(test)]
mod tests;

pub use error::{LockError, LockResult};
pub use pool::{SwitchGuard, SwitchLockPool};
