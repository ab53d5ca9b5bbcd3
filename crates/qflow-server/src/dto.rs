//! Data Transfer Objects for the HTTP API.

use std::collections::BTreeMap;

use qflow_hal::Counts;
use qflow_runner::{EvolutionResult, ExecutionOutcome, GateRecord};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Largest accepted shot count.
pub const MAX_SHOTS: i64 = 1_000_000;

fn default_shots() -> i64 {
    1024
}

/// Request body shared by `/api/v1/execute` and `/api/v1/execute-evolution`.
///
/// The evolution endpoint ignores `shots`, `memory`, `backend` and `seed`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    pub num_qubits: i64,
    pub gates: Vec<GateRecord>,
    #[serde(default = "default_shots")]
    pub shots: i64,
    #[serde(default)]
    pub memory: bool,
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Register size and shot count after range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedSizes {
    pub num_qubits: u32,
    pub shots: u32,
}

impl ExecuteRequest {
    /// Check `num_qubits >= 1` and `1 <= shots <= 1_000_000`.
    pub fn validate(&self) -> Result<ValidatedSizes, ApiError> {
        if self.num_qubits < 1 {
            return Err(ApiError::Validation(format!(
                "num_qubits must be at least 1, got {}",
                self.num_qubits
            )));
        }
        let num_qubits = u32::try_from(self.num_qubits).map_err(|_| {
            ApiError::Validation(format!("num_qubits is too large: {}", self.num_qubits))
        })?;

        if !(1..=MAX_SHOTS).contains(&self.shots) {
            return Err(ApiError::Validation(format!(
                "shots must be between 1 and {MAX_SHOTS}, got {}",
                self.shots
            )));
        }
        // In range, so the conversion cannot truncate.
        let shots = self.shots as u32;

        Ok(ValidatedSizes { num_qubits, shots })
    }
}

/// Response from `/api/v1/execute`.
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteResponse {
    pub backend: String,
    pub shots: u32,
    pub counts: Counts,
    pub probabilities: BTreeMap<String, f64>,
    pub memory: Option<Vec<String>>,
    pub status: &'static str,
}

impl From<ExecutionOutcome> for ExecuteResponse {
    fn from(outcome: ExecutionOutcome) -> Self {
        Self {
            backend: outcome.backend,
            shots: outcome.shots,
            counts: outcome.counts,
            probabilities: outcome.probabilities,
            memory: outcome.memory,
            status: "success",
        }
    }
}

/// Response from `/api/v1/execute-evolution`.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionResponse {
    pub status: &'static str,
    #[serde(rename = "intermediateStates")]
    pub intermediate_states: Vec<Vec<String>>,
}

impl From<EvolutionResult> for EvolutionResponse {
    fn from(result: EvolutionResult) -> Self {
        Self {
            status: "success",
            intermediate_states: result.snapshots,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Whether the default simulation backend is usable.
    pub qiskit: bool,
    /// Configured default backend name.
    pub backend_env: String,
    pub version: &'static str,
}

/// Summary of a registered backend.
#[derive(Debug, Clone, Serialize)]
pub struct BackendSummary {
    pub name: String,
    pub preferred: bool,
    pub is_simulator: bool,
    pub num_qubits: u32,
    pub max_shots: u32,
    pub available: bool,
    pub native_gates: Vec<String>,
}
