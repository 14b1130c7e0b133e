//! Error types for wind field construction.

use thiserror::Error;

/// Result type for wind field operations.
pub type WindFieldResult<T> = Result<T, WindFieldError>;

/// Errors raised while assembling a wind field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WindFieldError {
    /// Sample buffer length does not match the declared tensor shape.
    #[error("tensor shape {shape:?} needs {expected} samples, got {actual}")]
    DataLength {
        shape: [usize; 4],
        expected: usize,
        actual: usize,
    },

    /// Invalid simulation parameter.
    #[error("invalid simulation parameter: {0}")]
    InvalidParameter(String),
}
