use thiserror::Error;

/// Errors raised by core parsing and validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid vertical: {0}")]
    InvalidVertical(String),

    #[error("invalid input type: {0}")]
    InvalidInputType(String),

    #[error("invalid submission: {0}")]
    InvalidSubmission(String),
}
