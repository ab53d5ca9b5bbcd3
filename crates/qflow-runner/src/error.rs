//! Error types for the runner crate.

use thiserror::Error;

/// Errors raised while turning gate records into results.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunnerError {
    /// A known gate kind whose operands cannot be resolved.
    #[error("Invalid '{gate}' gate: {reason}")]
    InvalidGateSpec {
        /// Gate kind tag as received.
        gate: String,
        /// What was missing or out of range.
        reason: String,
    },

    /// A gate parameter that is not a real number.
    #[error("Invalid angle value: {value}")]
    InvalidAngle {
        /// The raw parameter value.
        value: String,
    },

    /// Every backend lookup in the fallback chain failed.
    #[error("Unable to get backend '{name}': {reason}")]
    BackendUnavailable {
        /// Requested backend name.
        name: String,
        /// Error from the last lookup attempt.
        reason: String,
    },

    /// The engine failed during a shot-based run.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The engine failed to produce a state vector.
    #[error("Failed to get statevector {}: {reason}", snapshot_site(.column))]
    SnapshotComputationFailed {
        /// Column position, or `None` for the initial snapshot.
        column: Option<i64>,
        /// Engine error message.
        reason: String,
    },
}

impl RunnerError {
    pub(crate) fn invalid_gate(gate: &str, reason: impl Into<String>) -> Self {
        Self::InvalidGateSpec {
            gate: gate.to_string(),
            reason: reason.into(),
        }
    }
}

#[allow(clippy::ref_option)]
fn snapshot_site(column: &Option<i64>) -> String {
    match column {
        Some(c) => format!("at column {c}"),
        None => "for the initial state".to_string(),
    }
}

/// Result type for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;
