//! Circuit execution endpoints.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use qflow_runner::{ExecutionRequest, get_state_evolution, resolve_backend, run_circuit};
use tracing::info;

use crate::dto::{EvolutionResponse, ExecuteRequest, ExecuteResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/v1/execute - Sample the circuit's measurement outcomes.
pub async fn execute(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> Result<Json<ExecuteResponse>, ApiError> {
    let Json(req) = payload?;
    let sizes = req.validate()?;
    info!(
        num_qubits = sizes.num_qubits,
        gates = req.gates.len(),
        shots = sizes.shots,
        "Execute request"
    );

    let request = ExecutionRequest {
        num_qubits: sizes.num_qubits,
        gates: &req.gates,
        shots: sizes.shots,
        memory: req.memory,
        backend: req.backend.as_deref(),
        seed: req.seed,
    };
    let outcome = run_circuit(&state.registry, &state.config.default_backend, &request).await?;

    Ok(Json(ExecuteResponse::from(outcome)))
}

/// POST /api/v1/execute-evolution - State vector after each column.
pub async fn execute_evolution(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> Result<Json<EvolutionResponse>, ApiError> {
    let Json(req) = payload?;
    let sizes = req.validate()?;
    info!(
        num_qubits = sizes.num_qubits,
        gates = req.gates.len(),
        "Evolution request"
    );

    let backend = resolve_backend(&state.registry, &state.config.default_backend)?;
    let result = get_state_evolution(backend.as_ref(), sizes.num_qubits, &req.gates).await?;

    Ok(Json(EvolutionResponse::from(result)))
}
