//! Error types for BTS encoding and decoding.

use thiserror::Error;
use wind_field::Component;

/// Errors that can occur while encoding or reading a BTS stream.
#[derive(Error, Debug)]
pub enum BtsError {
    /// The field has no samples or no grid points.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// NaN or infinity in the velocity tensor.
    #[error("non-finite value {value} in {component} component at sample {index}")]
    NonFiniteValue {
        component: Component,
        index: usize,
        value: f64,
    },

    /// I/O failure on the output sink.
    #[error("failed to write BTS stream: {0}")]
    SinkWrite(#[from] std::io::Error),

    /// The description bytes written disagree with the header length field.
    #[error("description length mismatch: header declares {declared} bytes, wrote {actual}")]
    EncodingLengthMismatch { declared: usize, actual: usize },

    /// Tensor dimensions disagree with the grid or the sample count.
    #[error("tensor shape {actual:?} does not match expected {expected:?}")]
    ShapeMismatch {
        expected: [usize; 4],
        actual: [usize; 4],
    },

    /// A count does not fit its 32-bit header field.
    #[error("{field} = {value} does not fit in a 32-bit header field")]
    DimensionOverflow { field: &'static str, value: usize },

    /// I/O failure while reading a stream.
    #[error("failed to read BTS stream: {0}")]
    ReadFailed(std::io::Error),

    /// Malformed or truncated BTS bytes.
    #[error("invalid BTS stream: {0}")]
    InvalidStream(String),

    /// Invalid encoder configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl BtsError {
    /// Create an EmptyInput error.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Create an InvalidStream error.
    pub fn invalid_stream(msg: impl Into<String>) -> Self {
        Self::InvalidStream(msg.into())
    }
}

/// Result type for BTS operations.
pub type Result<T> = std::result::Result<T, BtsError>;
