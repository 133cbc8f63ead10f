use thiserror::Error;
use yard_core::{SwitchId, TrainId};

#[derive(Debug, Error)]
pub enum LockError {
    #[error("{switch} is not in the pool (valid switches are 1..={switch_count})")]
    UnknownSwitch {
        switch:       SwitchId,
        switch_count: u32,
    },

    #[error("{0} cannot hold a switch: the id is the pool's no-holder marker")]
    InvalidTrain(TrainId),
}

pub type LockResult<T> = Result<T, LockError>;
