//! Failures writing narration or the departure log.
//!
//! Observer hooks return nothing, so these surface through each observer's
//! `take_error` once the dispatcher has finished.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Opening, writing, or flushing the sink failed.
    #[error("output sink: {0}")]
    Io(#[from] std::io::Error),

    /// A departure row could not be encoded.
    #[error("departure log: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
