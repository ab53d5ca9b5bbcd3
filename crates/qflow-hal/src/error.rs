//! Error types for the HAL crate.

use thiserror::Error;

/// Errors raised by backends and the backend registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// No backend could be created for a name.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// The engine failed while running a circuit.
    #[error("Simulation failed: {0}")]
    ExecutionFailed(String),

    /// The circuit cannot be run as given.
    #[error("Circuit rejected: {0}")]
    InvalidCircuit(String),

    /// Malformed backend configuration.
    #[error("Invalid backend configuration: {0}")]
    Configuration(String),

    /// The register is larger than the backend supports.
    #[error("Circuit needs {qubits} qubits but the backend supports at most {limit}")]
    CircuitTooLarge { qubits: usize, limit: u32 },

    /// Shot count outside the backend's range.
    #[error("Shot count {shots} is outside 1..={max}")]
    InvalidShots { shots: u32, max: u32 },

    /// The backend does not offer the requested operation.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Any other backend failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
