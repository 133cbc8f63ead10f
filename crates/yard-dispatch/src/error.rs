use thiserror::Error;
use yard_agent::AgentError;
use yard_core::YardError;
use yard_layout::LayoutError;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Config(#[from] YardError),

    #[error("yard layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("lock pool has {got} switches but the configuration expects {expected}")]
    PoolMismatch {
        expected: u32,
        got:      u32,
    },

    #[error("vehicle task error: {0}")]
    Agent(#[from] AgentError),

    #[error("worker slots closed before the task could start")]
    SlotsClosed,
}

pub type DispatchResult<T> = Result<T, DispatchError>;
