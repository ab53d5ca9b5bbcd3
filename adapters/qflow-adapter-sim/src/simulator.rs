//! Shot sampling and state vectors on top of [`Statevector`].

use async_trait::async_trait;
use num_complex::Complex64;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, instrument};

use qflow_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, RunOptions, ValidationResult,
};
use qflow_ir::Circuit;

use crate::statevector::Statevector;

/// Register size limit when the configuration does not set one.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// In-process state-vector simulator, registered under several names.
///
/// Gates are applied once per run; shots are sampled from the final state.
/// Measurements must be terminal.
pub struct SimulatorBackend {
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Largest register accepted.
    max_qubits: u32,
}

impl SimulatorBackend {
    /// An unregistered simulator capped at [`DEFAULT_MAX_QUBITS`].
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Same as [`SimulatorBackend::new`] with a different qubit cap.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(BackendConfig::new("simulator"), max_qubits)
    }

    /// Create a simulator from a registry configuration.
    ///
    /// The `max_qubits` extra, when present, must fit in a `u32`.
    pub fn from_backend_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra.get("max_qubits") {
            None => DEFAULT_MAX_QUBITS,
            Some(value) => value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    HalError::Configuration(format!("invalid max_qubits value: {value}"))
                })?,
        };
        Ok(Self::build(config, max_qubits))
    }

    fn build(config: BackendConfig, max_qubits: u32) -> Self {
        let capabilities = Capabilities::simulator(config.name.clone(), max_qubits);
        Self {
            config,
            capabilities,
            max_qubits,
        }
    }

    /// Maximum register size this instance accepts.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    fn check_size(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge {
                qubits: circuit.num_qubits(),
                limit: self.max_qubits,
            });
        }
        Ok(())
    }

    fn check_shots(&self, shots: u32) -> HalResult<()> {
        let max = self.capabilities.max_shots;
        if shots == 0 || shots > max {
            return Err(HalError::InvalidShots { shots, max });
        }
        Ok(())
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Measured `(qubit, clbit)` pairs in program order.
///
/// Fails when a gate touches a qubit that was already measured, or when the
/// circuit measures nothing.
fn terminal_measurements(circuit: &Circuit) -> HalResult<Vec<(usize, usize)>> {
    let mut measured = vec![false; circuit.num_qubits()];
    let mut pairs = Vec::new();

    for inst in circuit.instructions() {
        if inst.is_measure() {
            for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                measured[q.index()] = true;
                pairs.push((q.index(), c.index()));
            }
        } else if let Some(q) = inst.qubits.iter().find(|q| measured[q.index()]) {
            return Err(HalError::InvalidCircuit(format!(
                "gate '{}' acts on {} after it was measured",
                inst.name(),
                q
            )));
        }
    }

    if pairs.is_empty() {
        return Err(HalError::InvalidCircuit(
            "circuit has no measurements to sample".into(),
        ));
    }
    Ok(pairs)
}

/// Classical register contents for a sampled basis state, clbit 0 rightmost.
fn outcome_to_bitstring(outcome: usize, pairs: &[(usize, usize)], num_clbits: usize) -> String {
    let mut bits = vec![b'0'; num_clbits];
    for &(qubit, clbit) in pairs {
        bits[num_clbits - 1 - clbit] = if (outcome >> qubit) & 1 == 1 { b'1' } else { b'0' };
    }
    String::from_utf8_lossy(&bits).into_owned()
}

/// Evolve once, then draw `options.shots` samples. Blocking.
#[instrument(skip(circuit, options), fields(qubits = circuit.num_qubits(), shots = options.shots))]
fn run_simulation(circuit: &Circuit, options: &RunOptions) -> HalResult<ExecutionResult> {
    let start = Instant::now();
    let pairs = terminal_measurements(circuit)?;

    let sv = Statevector::from_circuit(circuit);
    let cumulative = sv.cumulative_probabilities();
    debug!(
        circuit = circuit.name(),
        instructions = circuit.instructions().len(),
        "evolved state"
    );

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut counts = Counts::new();
    let mut memory = options.memory.then(|| Vec::with_capacity(options.shots as usize));
    for _ in 0..options.shots {
        let outcome = Statevector::sample_from(&cumulative, &mut rng);
        let bitstring = outcome_to_bitstring(outcome, &pairs, circuit.num_clbits());
        if let Some(memory) = memory.as_mut() {
            memory.push(bitstring.clone());
        }
        counts.insert(bitstring, 1);
    }

    let elapsed = start.elapsed();
    debug!(?elapsed, distinct = counts.len(), "sampling finished");

    let mut result =
        ExecutionResult::new(counts, options.shots).with_execution_time(elapsed.as_millis() as u64);
    if let Some(memory) = memory {
        result = result.with_memory(memory);
    }
    Ok(result)
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    #[instrument(skip(self, circuit, options), fields(backend = %self.config.name))]
    async fn execute(
        &self,
        circuit: &Circuit,
        options: &RunOptions,
    ) -> HalResult<ExecutionResult> {
        self.check_size(circuit)?;
        self.check_shots(options.shots)?;
        if let ValidationResult::Invalid { reasons } = self.validate(circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        let circuit = circuit.clone();
        let options = *options;
        tokio::task::spawn_blocking(move || run_simulation(&circuit, &options))
            .await
            .map_err(|e| HalError::ExecutionFailed(format!("simulation task failed: {e}")))?
    }

    #[instrument(skip(self, circuit), fields(backend = %self.config.name))]
    async fn statevector(&self, circuit: &Circuit) -> HalResult<Vec<Complex64>> {
        self.check_size(circuit)?;
        if let ValidationResult::Invalid { reasons } = self.validate(circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        let circuit = circuit.clone();
        let amplitudes =
            tokio::task::spawn_blocking(move || Statevector::from_circuit(&circuit).into_amplitudes())
                .await
                .map_err(|e| HalError::ExecutionFailed(format!("state vector task failed: {e}")))?;
        debug!("Computed {} amplitudes", amplitudes.len());
        Ok(amplitudes)
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        Self::from_backend_config(config)
    }
}
