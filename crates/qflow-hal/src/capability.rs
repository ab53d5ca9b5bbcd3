//! Backend capability introspection.
//!
//! This module defines the types that describe what a simulation backend can
//! do: register size, supported gates and shot limits. The execution driver
//! uses them to reject circuits before they reach the engine.

use serde::{Deserialize, Serialize};

use qflow_ir::Circuit;

/// Capabilities of a simulation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) vs real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"`, `"memory"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for an exact state-vector simulator.
    pub fn simulator(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gate_set: GateSet::standard(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into(), "memory".into()],
        }
    }

    /// Check whether a named feature is advertised.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Reasons a circuit cannot run on a backend with these capabilities.
    ///
    /// An empty list means the circuit fits.
    pub fn violations(&self, circuit: &Circuit) -> Vec<String> {
        let mut reasons = Vec::new();

        if circuit.num_qubits() > self.num_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but backend '{}' supports at most {}",
                circuit.num_qubits(),
                self.name,
                self.num_qubits
            ));
        }

        for inst in circuit.instructions() {
            if !inst.is_measure() && !self.gate_set.contains(inst.name()) {
                reasons.push(format!(
                    "gate '{}' is not supported by backend '{}'",
                    inst.name(),
                    self.name
                ));
            }
        }

        reasons
    }
}

/// Gate set supported by a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
    /// Three-qubit gates supported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub three_qubit: Vec<String>,
    /// Native gates (execute without decomposition on this backend).
    pub native: Vec<String>,
}

impl GateSet {
    /// The full gate vocabulary accepted by the service, all native.
    pub fn standard() -> Self {
        let single_qubit: Vec<String> = ["h", "x", "y", "z", "s", "t", "rx", "ry", "rz", "p"]
            .into_iter()
            .map(String::from)
            .collect();
        let two_qubit: Vec<String> = ["cx", "cz", "swap"].into_iter().map(String::from).collect();
        let three_qubit = vec!["ccx".to_string()];

        let native = single_qubit
            .iter()
            .chain(&two_qubit)
            .chain(&three_qubit)
            .cloned()
            .collect();

        Self {
            single_qubit,
            two_qubit,
            three_qubit,
            native,
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate)
            || self.two_qubit.iter().any(|g| g == gate)
            || self.three_qubit.iter().any(|g| g == gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qflow_ir::QubitId;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator("aer_simulator", 20);
        assert_eq!(caps.name, "aer_simulator");
        assert_eq!(caps.num_qubits, 20);
        assert!(caps.is_simulator);
        assert!(caps.has_feature("statevector"));
        assert!(!caps.has_feature("shuttling"));
    }

    #[test]
    fn test_standard_gate_set_covers_vocabulary() {
        let gates = GateSet::standard();
        for name in qflow_ir::StandardGate::vocabulary() {
            assert!(gates.contains(name), "missing {name}");
        }
        assert!(!gates.contains("iswap"));
        assert_eq!(gates.native.len(), 14);
    }

    #[test]
    fn test_violations_for_oversized_circuit() {
        let caps = Capabilities::simulator("sim", 2);
        let mut circuit = Circuit::with_size("big", 3, 0);
        circuit.h(QubitId(2)).unwrap();

        let reasons = caps.violations(&circuit);
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("at most 2"));
    }

    #[test]
    fn test_no_violations_for_fitting_circuit() {
        let caps = Capabilities::simulator("sim", 5);
        let circuit = Circuit::bell().unwrap();
        assert!(caps.violations(&circuit).is_empty());
    }
}
