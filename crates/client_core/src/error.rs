use thiserror::Error;

use crate::{client::EncodeError, gate::PayloadError, gate::SubmissionBlocked};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("rotor slot {slot} is out of range 1..={slots}")]
    SlotOutOfRange { slot: usize, slots: usize },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Blocked(#[from] SubmissionBlocked),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("submission {generation} was superseded by a newer submission")]
    Superseded { generation: u64 },
}
