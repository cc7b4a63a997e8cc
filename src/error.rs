//! Crate error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur while loading input or building a simulation.
///
/// Scheduling outcomes (a family that has to wait, or can never be seated)
/// are not errors; they are recorded in the frames.
#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("invalid seating configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ValidationError>),

    #[error("file could not be read or written: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, SeatingError>;
