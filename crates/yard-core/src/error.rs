//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `YardError` as one
//! variant via `#[from]` where a configuration failure can surface.

use thiserror::Error;

use crate::SwitchId;

/// The top-level error type for `yard-core`.
#[derive(Debug, Error)]
pub enum YardError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0} is outside the configured switch range")]
    SwitchOutOfRange(SwitchId),
}

/// Shorthand result type for `yard-core`.
pub type YardResult<T> = Result<T, YardError>;
