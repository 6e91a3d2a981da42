//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A step failed construction-time validation.
    #[error("Invalid step: {0}")]
    InvalidStep(String),

    /// The external planner could not produce a step list.
    #[error("Planner failure: {0}")]
    Planner(String),

    /// A step payload could not be parsed.
    #[error("Malformed step payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
