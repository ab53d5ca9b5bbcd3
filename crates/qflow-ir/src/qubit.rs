//! Qubit and classical bit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl QubitId {
    /// Position of this qubit's bit in a basis-state index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl ClbitId {
    /// Position of this bit in an outcome bitstring, counted from the right.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", QubitId(12)), "q12");
    }

    #[test]
    fn test_clbit_display() {
        assert_eq!(format!("{}", ClbitId(3)), "c3");
    }

    #[test]
    fn test_ordering_follows_index() {
        let mut ids = vec![QubitId(2), QubitId(0), QubitId(1)];
        ids.sort();
        assert_eq!(ids, vec![QubitId(0), QubitId(1), QubitId(2)]);
    }
}
