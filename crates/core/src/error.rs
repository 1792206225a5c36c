use thiserror::Error;

use crate::process::{ProcessId, Time};

/// Malformed workload, rejected before any simulation work starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("workload contains no processes")]
    Empty,

    #[error("process at position {index} has an empty id")]
    EmptyId { index: usize },

    #[error("duplicate process id: {0}")]
    DuplicateId(ProcessId),

    #[error("process {id} has negative arrival time {arrival_time}")]
    NegativeArrival { id: ProcessId, arrival_time: Time },

    #[error("process {id} has non-positive burst time {burst_time}")]
    NonPositiveBurst { id: ProcessId, burst_time: Time },

    #[error("process {id} has a non-finite {field}")]
    NonFiniteTime { id: ProcessId, field: &'static str },
}

/// An engine invariant was violated mid-simulation. Never expected for
/// validated input.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("internal inconsistency at t={time}: {message}")]
pub struct InternalInconsistencyError {
    pub time: Time,
    pub message: String,
}

impl InternalInconsistencyError {
    pub fn new(time: Time, message: impl Into<String>) -> Self {
        Self {
            time,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SrtfError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    InternalInconsistency(#[from] InternalInconsistencyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported workload format: {0}")]
    UnsupportedFormat(String),
}

impl SrtfError {
    /// True for errors the caller can fix by changing the workload.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SrtfError::InvalidInput(_) | SrtfError::Parse(_) | SrtfError::UnsupportedFormat(_)
        )
    }
}
