//! Race-engine errors.
//!
//! These are faults: instructor mistakes and infrastructure failures.
//! Routine turn-aways of a submission (deadline passed, board full, and so
//! on) are not errors; they come back as [`crate::engine::RejectReason`]
//! values.

use thiserror::Error;

use raceboard_store::StoreError;

#[derive(Debug, Error)]
pub enum RaceError {
    #[error("problem text must not be empty")]
    EmptyProblem,

    #[error("duration must be between {min} and {max} minutes, got {got}")]
    DurationOutOfRange { min: u32, max: u32, got: u32 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
