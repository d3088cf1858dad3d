//! Error types for the HAL crate.

use thiserror::Error;

use qsim_ir::IrError;

/// Errors that can occur while configuring or executing a run.
///
/// A failed run never yields a partial result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Histogram does not add up to the shot count.
    #[error("Counts sum to {got} but {expected} shots were requested")]
    CountsMismatch {
        /// Requested shots.
        expected: u64,
        /// Sum of histogram counts.
        got: u64,
    },

    /// The state cannot be sampled (e.g. zero norm).
    #[error("Numerical error: {0}")]
    Numerical(String),

    /// Run was cancelled by the caller.
    #[error("Run cancelled")]
    Cancelled,

    /// Circuit construction error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
