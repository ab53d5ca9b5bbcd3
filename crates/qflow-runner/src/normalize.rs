//! Gate normalization.
//!
//! Each known gate kind has a fixed operand-resolution rule:
//!
//! | Tags | Operands | Angle keys |
//! |------|----------|------------|
//! | `h x y z s t` | `qubit` | |
//! | `rx ry` | `qubit` | `theta`, `angle` |
//! | `rz p` | `qubit` | `phi`, `lambda`, `angle` |
//! | `cnot cx cz` | control = `qubit` else `controls[0]`; target = `targets[0]` | |
//! | `swap` | `qubit` else `targets[0]`; then `targets[0]` if the first came from `qubit`, else `controls[0]` | |
//! | `toffoli ccx` | `controls[0]`, `controls[1]`, `targets[0]` | |
//!
//! Angles come from the first key holding a non-zero, non-empty value,
//! defaulting to 0.
//!
//! Unknown tags normalize to [`Normalized::Ignored`] rather than an error, so
//! newer clients can send gates this service does not know yet.

use qflow_ir::{Circuit, Instruction, QubitId, StandardGate};

use crate::angle::resolve_angle;
use crate::error::{RunnerError, RunnerResult};
use crate::record::GateRecord;

const THETA_KEYS: &[&str] = &["theta", "angle"];
const PHASE_KEYS: &[&str] = &["phi", "lambda", "angle"];

/// Gate kinds the service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// S.
    S,
    /// T.
    T,
    /// X rotation.
    Rx,
    /// Y rotation.
    Ry,
    /// Z rotation.
    Rz,
    /// Phase.
    P,
    /// CNOT, tagged `cnot` or `cx`.
    Cx,
    /// Controlled-Z.
    Cz,
    /// SWAP.
    Swap,
    /// Toffoli, tagged `toffoli` or `ccx`.
    Ccx,
}

/// How a gate kind binds its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// One operand from `qubit`.
    Single,
    /// One operand from `qubit` plus an angle from the listed keys.
    SingleAngle(&'static [&'static str]),
    /// Control and target.
    ControlTarget,
    /// Two interchangeable operands.
    Symmetric,
    /// Two controls and a target.
    DoubleControl,
}

impl GateKind {
    /// Look up a tag, case-sensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "h" => GateKind::H,
            "x" => GateKind::X,
            "y" => GateKind::Y,
            "z" => GateKind::Z,
            "s" => GateKind::S,
            "t" => GateKind::T,
            "rx" => GateKind::Rx,
            "ry" => GateKind::Ry,
            "rz" => GateKind::Rz,
            "p" => GateKind::P,
            "cnot" | "cx" => GateKind::Cx,
            "cz" => GateKind::Cz,
            "swap" => GateKind::Swap,
            "toffoli" | "ccx" => GateKind::Ccx,
            _ => return None,
        })
    }

    /// Operand-resolution rule for this kind.
    pub fn arity(self) -> Arity {
        match self {
            GateKind::H | GateKind::X | GateKind::Y | GateKind::Z | GateKind::S | GateKind::T => {
                Arity::Single
            }
            GateKind::Rx | GateKind::Ry => Arity::SingleAngle(THETA_KEYS),
            GateKind::Rz | GateKind::P => Arity::SingleAngle(PHASE_KEYS),
            GateKind::Cx | GateKind::Cz => Arity::ControlTarget,
            GateKind::Swap => Arity::Symmetric,
            GateKind::Ccx => Arity::DoubleControl,
        }
    }

    fn gate(self, angle: f64) -> StandardGate {
        match self {
            GateKind::H => StandardGate::H,
            GateKind::X => StandardGate::X,
            GateKind::Y => StandardGate::Y,
            GateKind::Z => StandardGate::Z,
            GateKind::S => StandardGate::S,
            GateKind::T => StandardGate::T,
            GateKind::Rx => StandardGate::Rx(angle),
            GateKind::Ry => StandardGate::Ry(angle),
            GateKind::Rz => StandardGate::Rz(angle),
            GateKind::P => StandardGate::P(angle),
            GateKind::Cx => StandardGate::CX,
            GateKind::Cz => StandardGate::CZ,
            GateKind::Swap => StandardGate::Swap,
            GateKind::Ccx => StandardGate::CCX,
        }
    }
}

/// A gate bound to concrete operands.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGate {
    /// The gate, with its angle in radians.
    pub gate: StandardGate,
    /// Operands in gate order (controls first).
    pub qubits: Vec<QubitId>,
}

impl NormalizedGate {
    /// The circuit instruction for this gate.
    pub fn instruction(&self) -> Instruction {
        Instruction::gate(self.gate, self.qubits.iter().copied())
    }
}

/// Outcome of normalizing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// A known gate with resolved operands.
    Apply(NormalizedGate),
    /// An unknown tag, to be skipped.
    Ignored(String),
}

/// Resolve a record to a concrete gate application.
pub fn normalize(record: &GateRecord) -> RunnerResult<Normalized> {
    let Some(kind) = GateKind::from_tag(&record.kind) else {
        return Ok(Normalized::Ignored(record.kind.clone()));
    };
    let tag = record.kind.as_str();
    let missing = |what: &str| RunnerError::invalid_gate(tag, format!("missing {what}"));

    let (angle, operands) = match kind.arity() {
        Arity::Single => (0.0, vec![record.qubit.ok_or_else(|| missing("qubit"))?]),
        Arity::SingleAngle(keys) => {
            let angle = match record.param(keys) {
                Some(value) => resolve_angle(value)?,
                None => 0.0,
            };
            (angle, vec![record.qubit.ok_or_else(|| missing("qubit"))?])
        }
        Arity::ControlTarget => {
            let control = record
                .qubit
                .or_else(|| record.first_control())
                .ok_or_else(|| missing("control (qubit or controls[0])"))?;
            let target = record
                .first_target()
                .ok_or_else(|| missing("target (targets[0])"))?;
            (0.0, vec![control, target])
        }
        Arity::Symmetric => {
            let (first, second) = match record.qubit {
                Some(q) => (Some(q), record.first_target()),
                None => (record.first_target(), record.first_control()),
            };
            match (first, second) {
                (Some(a), Some(b)) => (0.0, vec![a, b]),
                _ => {
                    return Err(missing(
                        "two qubits (qubit and targets[0], or targets[0] and controls[0])",
                    ));
                }
            }
        }
        Arity::DoubleControl => {
            let controls = record.controls.as_deref().unwrap_or_default();
            let target = record.first_target();
            match (controls, target) {
                ([c1, c2, ..], Some(t)) => (0.0, vec![*c1, *c2, t]),
                _ => return Err(missing("controls[0], controls[1] and targets[0]")),
            }
        }
    };

    let qubits = operands
        .into_iter()
        .map(|q| {
            u32::try_from(q)
                .map(QubitId)
                .map_err(|_| RunnerError::invalid_gate(tag, format!("qubit index {q} is out of range")))
        })
        .collect::<RunnerResult<Vec<_>>>()?;

    Ok(Normalized::Apply(NormalizedGate {
        gate: kind.gate(angle),
        qubits,
    }))
}

/// Append a normalized gate to a circuit.
///
/// Operand range and duplicate checks happen here, against the circuit's size.
pub fn apply_normalized(
    circuit: &mut Circuit,
    tag: &str,
    gate: &NormalizedGate,
) -> RunnerResult<()> {
    circuit
        .apply(gate.instruction())
        .map(|_| ())
        .map_err(|e| RunnerError::invalid_gate(tag, e.to_string()))
}
