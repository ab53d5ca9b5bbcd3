//! The circuit handle the request pipeline builds into.

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// An ordered list of instructions over fixed quantum and classical registers.
///
/// Operands are checked on [`apply`](Circuit::apply), so every stored
/// instruction addresses bits inside the registers.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// An empty circuit with `num_qubits` qubits and `num_clbits` classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: Vec::new(),
        }
    }

    /// Validate `instruction` against the registers and append it.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        let op = instruction.name();

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits() as usize;
            if instruction.qubits.len() != expected {
                return Err(IrError::WrongArity {
                    op,
                    expected,
                    got: instruction.qubits.len(),
                });
            }
        }

        if let Some(&qubit) = instruction.qubits.iter().find(|q| q.0 >= self.num_qubits) {
            return Err(IrError::QubitOutOfRange {
                qubit,
                width: self.num_qubits,
                op,
            });
        }
        if let Some(qubit) = first_repeat(&instruction.qubits) {
            return Err(IrError::RepeatedQubit { qubit, op });
        }

        if let Some(&clbit) = instruction.clbits.iter().find(|c| c.0 >= self.num_clbits) {
            return Err(IrError::ClbitOutOfRange {
                clbit,
                width: self.num_clbits,
                op,
            });
        }

        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append `gate` on `qubits`.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, [qubit])
    }

    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::X, [qubit])
    }

    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, [control, target])
    }

    /// Read `qubit` into `clbit`.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure([(qubit, clbit)]))
    }

    /// Read qubit `i` into classical bit `i` for every qubit.
    ///
    /// The classical register grows to the width of the quantum one if needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        self.num_clbits = self.num_clbits.max(self.num_qubits);
        let pairs = (0..self.num_qubits).map(|i| (QubitId(i), ClbitId(i)));
        self.apply(Instruction::measure(pairs))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Gate count, measurements excluded.
    pub fn num_gates(&self) -> usize {
        self.instructions.iter().filter(|i| !i.is_measure()).count()
    }

    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// H on qubit 0, CX 0→1, then both qubits measured.
    pub fn bell() -> IrResult<Self> {
        Self::ghz(2)
    }

    /// H on qubit 0, a CX chain down the register, then all qubits measured.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size(format!("ghz_{n}"), n, n);
        if n > 0 {
            circuit.h(QubitId(0))?;
            for i in 1..n {
                circuit.cx(QubitId(i - 1), QubitId(i))?;
            }
            circuit.measure_all()?;
        }
        Ok(circuit)
    }
}

/// A qubit listed more than once, found in O(n log n) so register-wide
/// measurements stay cheap.
fn first_repeat(qubits: &[QubitId]) -> Option<QubitId> {
    if qubits.len() < 2 {
        return None;
    }
    let mut sorted = qubits.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).find(|w| w[0] == w[1]).map(|w| w[0])
}
