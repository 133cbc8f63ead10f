use thiserror::Error;
use yard_lock::LockError;

/// Failures that end a vehicle task abnormally.
///
/// Lock timeouts and missing routes are not errors: they drive the retry
/// loop and the `Halted` state respectively.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("switch lock error: {0}")]
    Lock(#[from] LockError),
}

pub type AgentResult<T> = Result<T, AgentError>;
