//! Error types for packmath
//!
//! Only the slice kernels can fail. The packet evaluators are total: bad
//! inputs come back as NaN or ±inf lanes.

use thiserror::Error;

/// Result type alias using packmath's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in slice kernels
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input and output slices differ in length
    #[error("Length mismatch: input has {input} elements, output has {output}")]
    LengthMismatch {
        /// Input length
        input: usize,
        /// Output length
        output: usize,
    },
}

impl Error {
    /// Create a length mismatch error
    pub fn length_mismatch(input: usize, output: usize) -> Self {
        Self::LengthMismatch { input, output }
    }
}
