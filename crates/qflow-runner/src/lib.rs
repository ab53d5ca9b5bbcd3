//! QuantumFlow Runner
//!
//! This crate turns loosely-typed gate records into circuits and drives them
//! through a simulation backend.
//!
//! # Pipeline
//!
//! ```text
//!   GateRecord ──→ build_columns ──┬─→ assemble_circuit ──→ run_circuit       (counts)
//!                                  └─→ get_state_evolution                    (snapshots)
//! ```
//!
//! Both paths normalize each record with [`normalize`] and resolve angles
//! with [`resolve_angle`]. They differ in how a bad gate is handled:
//! [`assemble_circuit`] aborts, [`get_state_evolution`] skips the gate and
//! logs a warning (see [`GateFailurePolicy`]).
//!
//! # Example
//!
//! ```rust
//! use qflow_runner::{GateRecord, assemble_circuit};
//!
//! let gates = vec![
//!     GateRecord::new("h").on(0).at(0),
//!     GateRecord::new("cnot").on(0).with_targets([1]).at(1),
//! ];
//! let circuit = assemble_circuit(2, &gates).unwrap();
//! assert_eq!(circuit.num_gates(), 2);
//! assert!(circuit.has_measurements());
//! ```

pub mod angle;
pub mod assemble;
pub mod columns;
pub mod driver;
pub mod error;
pub mod evolution;
pub mod normalize;
pub mod record;

#[cfg(test)]
mod testing;

pub use angle::{RADIAN_LIMIT, resolve_angle, to_radians};
pub use assemble::{ApplyReport, GateFailurePolicy, apply_gates, assemble_circuit};
pub use columns::{Column, build_columns};
pub use driver::{
    ExecutionOutcome, ExecutionRequest, LEGACY_BACKEND, resolve_backend, run_circuit,
};
pub use error::{RunnerError, RunnerResult};
pub use evolution::{EvolutionResult, format_amplitude, get_state_evolution};
pub use normalize::{Arity, GateKind, Normalized, NormalizedGate, apply_normalized, normalize};
pub use record::{GateRecord, ParamValue};
