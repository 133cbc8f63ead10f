use thiserror::Error;
use yard_core::{SwitchId, TrackId, TrainId, YardError};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout parse error: {0}")]
    Parse(String),

    #[error("{0} appears more than once in the fleet table")]
    DuplicateTrain(TrainId),

    #[error("{0} is not a valid train id (expected 1..{max})", max = u32::MAX)]
    InvalidTrain(TrainId),

    #[error("route {inbound} -> {outbound} uses {switch} more than once")]
    RepeatedSwitch {
        inbound:  TrackId,
        outbound: TrackId,
        switch:   SwitchId,
    },

    #[error(transparent)]
    Yard(#[from] YardError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
