//! The gate vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every gate a request can name, with its rotation angle when it has one.
///
/// Rotation angles are always concrete radians; unit disambiguation happens
/// before a gate reaches the IR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    X,
    Y,
    Z,

    H,
    /// Phase π/2.
    S,
    /// Phase π/4.
    T,

    /// Angles are in radians.
    Rx(f64),
    Ry(f64),
    Rz(f64),
    /// diag(1, e^{iλ}).
    P(f64),

    /// Operands: control, target.
    CX,
    CZ,
    Swap,

    /// Operands: control, control, target.
    CCX,
}

impl StandardGate {
    /// Lowercase mnemonic.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::T => "t",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
        }
    }

    /// Operand count.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::T
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,

            StandardGate::CCX => 3,
        }
    }

    /// The rotation angle, for parameterized gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(a) | StandardGate::Ry(a) | StandardGate::Rz(a) | StandardGate::P(a) => {
                Some(*a)
            }
            _ => None,
        }
    }

    /// Names of every gate in the vocabulary, in declaration order.
    pub fn vocabulary() -> &'static [&'static str] {
        &[
            "x", "y", "z", "h", "s", "t", "rx", "ry", "rz", "p", "cx", "cz", "swap", "ccx",
        ]
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle() {
            Some(angle) => write!(f, "{}({angle:.4})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::Rz(PI).num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::Swap.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
    }

    #[test]
    fn test_angle_only_on_rotations() {
        assert_eq!(StandardGate::Rx(0.5).angle(), Some(0.5));
        assert_eq!(StandardGate::P(PI).angle(), Some(PI));
        assert_eq!(StandardGate::H.angle(), None);
        assert_eq!(StandardGate::CZ.angle(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(StandardGate::H.to_string(), "h");
        assert_eq!(StandardGate::Ry(PI / 2.0).to_string(), "ry(1.5708)");
    }

    #[test]
    fn test_vocabulary_matches_names() {
        let gates = [
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::S,
            StandardGate::T,
            StandardGate::Rx(0.0),
            StandardGate::Ry(0.0),
            StandardGate::Rz(0.0),
            StandardGate::P(0.0),
            StandardGate::CX,
            StandardGate::CZ,
            StandardGate::Swap,
            StandardGate::CCX,
        ];
        let names: Vec<_> = gates.iter().map(StandardGate::name).collect();
        assert_eq!(names, StandardGate::vocabulary());
    }
}
