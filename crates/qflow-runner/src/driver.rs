//! Execution driver: backend resolution and shot-based runs.

use std::collections::BTreeMap;

use qflow_hal::{Backend, BackendConfig, BackendRegistry, Counts, HalError, RunOptions};
use tracing::{debug, info, instrument, warn};

use crate::assemble::assemble_circuit;
use crate::error::{RunnerError, RunnerResult};
use crate::record::GateRecord;

/// Backend used when the requested name cannot be resolved.
pub const LEGACY_BACKEND: &str = "qasm_simulator";

/// A shot-based run request.
#[derive(Debug, Clone)]
pub struct ExecutionRequest<'a> {
    /// Register size.
    pub num_qubits: u32,
    /// Raw gates, in any order.
    pub gates: &'a [GateRecord],
    /// Number of repetitions.
    pub shots: u32,
    /// Keep one bitstring per shot.
    pub memory: bool,
    /// Backend override; the configured default is used when absent.
    pub backend: Option<&'a str>,
    /// Sampler seed.
    pub seed: Option<u64>,
}

/// Post-processed result of a shot-based run.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    /// The backend name that was requested.
    pub backend: String,
    /// Requested number of shots.
    pub shots: u32,
    /// Outcome counts.
    pub counts: Counts,
    /// Counts divided by the requested shots.
    pub probabilities: BTreeMap<String, f64>,
    /// Per-shot bitstrings, when requested and supplied by the engine.
    pub memory: Option<Vec<String>>,
}

/// Resolve a backend by name.
///
/// Tries, in order: the preferred backend when `name` matches it exactly,
/// the by-name table, then [`LEGACY_BACKEND`].
pub fn resolve_backend(registry: &BackendRegistry, name: &str) -> RunnerResult<Box<dyn Backend>> {
    if registry.preferred_name() == Some(name) {
        match registry.create_preferred(BackendConfig::new(name)) {
            Ok(backend) => return Ok(backend),
            Err(e) => debug!("Preferred backend '{}' failed: {}", name, e),
        }
    }

    match registry.create(name, BackendConfig::new(name)) {
        Ok(backend) => return Ok(backend),
        Err(e) => debug!("Backend lookup for '{}' failed: {}", name, e),
    }

    warn!("Falling back to {} for '{}'", LEGACY_BACKEND, name);
    registry
        .create(LEGACY_BACKEND, BackendConfig::new(LEGACY_BACKEND))
        .map_err(|e| RunnerError::BackendUnavailable {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

/// Resolve the backend, assemble the request's circuit and sample it.
///
/// Registers wider than the backend's capacity fail before assembly.
#[instrument(skip_all, fields(num_qubits = request.num_qubits, shots = request.shots))]
pub async fn run_circuit(
    registry: &BackendRegistry,
    default_backend: &str,
    request: &ExecutionRequest<'_>,
) -> RunnerResult<ExecutionOutcome> {
    let backend_name = request.backend.unwrap_or(default_backend);

    let backend = resolve_backend(registry, backend_name)?;
    debug!("Running on backend '{}'", backend.name());

    // Checked before assembly so oversized registers are never materialized.
    let limit = backend.capabilities().num_qubits;
    if request.num_qubits > limit {
        return Err(RunnerError::ExecutionFailed(
            HalError::CircuitTooLarge {
                qubits: request.num_qubits as usize,
                limit,
            }
            .to_string(),
        ));
    }

    let circuit = assemble_circuit(request.num_qubits, request.gates)?;

    let options = RunOptions::new(request.shots)
        .with_memory(request.memory)
        .with_seed(request.seed);
    let result = backend
        .execute(&circuit, &options)
        .await
        .map_err(|e| RunnerError::ExecutionFailed(e.to_string()))?;

    let memory = if request.memory {
        if result.memory.is_none() {
            warn!("Backend '{}' returned no memory", backend.name());
        }
        result.memory
    } else {
        None
    };

    let probabilities = result.counts.probabilities(u64::from(request.shots));
    info!(
        backend = backend_name,
        outcomes = result.counts.len(),
        observed_shots = result.counts.total(),
        "Execution complete"
    );

    Ok(ExecutionOutcome {
        backend: backend_name.to_string(),
        shots: request.shots,
        counts: result.counts,
        probabilities,
        memory,
    })
}
