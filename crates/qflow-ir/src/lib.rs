//! QuantumFlow Circuit Representation
//!
//! This crate provides the mutable circuit handle that the request pipeline
//! builds gate by gate before handing it to a simulation backend.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing quantum
//!   and classical registers
//! - **Gates**: [`StandardGate`], the fixed gate vocabulary the service accepts
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`], an ordered instruction list with operand validation
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qflow_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_gates(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `T` | 1 | Phase gates (π/2, π/4) |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `P` | 1 | Phase gate P(λ) |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ` | 2 | Controlled-Z |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX` | 3 | Toffoli (CCNOT) gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
