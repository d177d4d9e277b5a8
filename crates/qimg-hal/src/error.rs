//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur while simulating circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Circuit exceeds simulator capabilities.
    #[error("Circuit exceeds simulator capabilities: {0}")]
    CircuitTooLarge(String),

    /// A histogram whose probabilities do not sum to one.
    #[error("Histogram mass is {total}, expected 1")]
    InvalidHistogram {
        /// Sum of all probabilities.
        total: f64,
    },
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
