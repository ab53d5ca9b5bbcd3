//! Operations recorded in a circuit.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// What an [`Instruction`] does to its operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    Gate(StandardGate),
    /// Read `qubits[i]` into `clbits[i]`.
    Measure,
}

/// One step of a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    /// Empty for gates.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// A gate over `qubits`, in the gate's operand order (controls first).
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    /// A measurement of each `(qubit, clbit)` pair.
    pub fn measure(pairs: impl IntoIterator<Item = (QubitId, ClbitId)>) -> Self {
        let (qubits, clbits) = pairs.into_iter().unzip();
        Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        }
    }

    /// The gate, unless this is a measurement.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(gate) => Some(gate),
            InstructionKind::Measure => None,
        }
    }

    pub fn is_measure(&self) -> bool {
        self.as_gate().is_none()
    }

    /// Lowercase mnemonic, `"measure"` for measurements.
    pub fn name(&self) -> &'static str {
        self.as_gate().map_or("measure", StandardGate::name)
    }
}
