//! QuantumFlow Local State-Vector Simulator
//!
//! This crate provides the simulation engine behind the service: an exact
//! state-vector simulator implementing [`qflow_hal::Backend`]. Results are
//! exact for state-vector queries and sampled for shot-based runs.
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//! | 25 | ~512 MB |
//!
//! # Backend names
//!
//! [`register_simulators`] installs the simulator under the names clients
//! are used to: `aer_simulator` (preferred), `qasm_simulator` (the legacy
//! default) and `statevector_simulator`.

mod simulator;
mod statevector;

use qflow_hal::{BackendConfig, BackendRegistry};

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
pub use statevector::Statevector;

/// Name of the preferred simulator.
pub const AER_SIMULATOR: &str = "aer_simulator";
/// Name of the legacy default simulator.
pub const QASM_SIMULATOR: &str = "qasm_simulator";
/// Name of the state-vector simulator alias.
pub const STATEVECTOR_SIMULATOR: &str = "statevector_simulator";

/// Register the simulator under every name it answers to.
///
/// `max_qubits` caps the register size of every instance the registry creates.
pub fn register_simulators(registry: &mut BackendRegistry, max_qubits: u32) {
    let with_limit = move |config: BackendConfig| {
        let config = if config.extra_u64("max_qubits").is_some() {
            config
        } else {
            config.with_extra("max_qubits", serde_json::json!(max_qubits))
        };
        SimulatorBackend::from_backend_config(config)
    };

    registry.set_preferred(AER_SIMULATOR, move |config| {
        Ok(Box::new(with_limit(config)?))
    });
    for name in [QASM_SIMULATOR, STATEVECTOR_SIMULATOR] {
        registry.register_factory(name, move |config| Ok(Box::new(with_limit(config)?)));
    }
}
