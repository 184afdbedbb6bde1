//! Model-loading error type.

use thiserror::Error;

/// Errors produced while loading a lane network.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, ModelError>`.
pub type ModelResult<T> = Result<T, ModelError>;
