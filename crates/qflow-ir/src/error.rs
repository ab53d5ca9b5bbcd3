//! Operand validation errors raised while building a circuit.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Why an instruction was refused by [`Circuit::apply`](crate::Circuit::apply).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operand names a qubit beyond the register.
    #[error("'{op}' addresses {qubit} but the register has {width} qubits")]
    QubitOutOfRange {
        qubit: QubitId,
        width: u32,
        op: &'static str,
    },

    #[error("'{op}' writes {clbit} but the register has {width} classical bits")]
    ClbitOutOfRange {
        clbit: ClbitId,
        width: u32,
        op: &'static str,
    },

    /// The gate was given the wrong number of operands.
    #[error("'{op}' acts on {expected} qubits, {got} given")]
    WrongArity {
        op: &'static str,
        expected: usize,
        got: usize,
    },

    /// The same qubit appears twice in one instruction.
    #[error("'{op}' uses {qubit} more than once")]
    RepeatedQubit { qubit: QubitId, op: &'static str },
}

/// Result type for circuit construction.
pub type IrResult<T> = Result<T, IrError>;
