//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;

use qflow_ir::{Circuit, Instruction, InstructionKind, StandardGate};

/// A statevector representing a quantum state.
///
/// Basis index bit `k` holds the value of qubit `k`.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Apply every gate of `circuit` to |0...0⟩.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut sv = Self::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            sv.apply(inst);
        }
        sv
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the statevector and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.apply_gate(gate, &qubits);
            }
            // Measurements are terminal; sampling reads the final state.
            InstructionKind::Measure => {}
        }
    }

    fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);

        match *gate {
            StandardGate::X => self.flip_where(0, qubits[0]),
            StandardGate::Y => self.apply_matrix(qubits[0], [[zero, -i], [i, zero]]),
            StandardGate::Z => self.apply_diagonal(qubits[0], one, -one),
            StandardGate::H => {
                let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
                self.apply_matrix(qubits[0], [[h, h], [h, -h]]);
            }
            StandardGate::S => self.apply_diagonal(qubits[0], one, i),
            StandardGate::T => {
                self.apply_diagonal(qubits[0], one, Complex64::from_polar(1.0, PI / 4.0));
            }
            StandardGate::Rx(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new(0.0, -(theta / 2.0).sin());
                self.apply_matrix(qubits[0], [[c, s], [s, c]]);
            }
            StandardGate::Ry(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new((theta / 2.0).sin(), 0.0);
                self.apply_matrix(qubits[0], [[c, -s], [s, c]]);
            }
            StandardGate::Rz(theta) => self.apply_diagonal(
                qubits[0],
                Complex64::from_polar(1.0, -theta / 2.0),
                Complex64::from_polar(1.0, theta / 2.0),
            ),
            StandardGate::P(theta) => {
                self.apply_diagonal(qubits[0], one, Complex64::from_polar(1.0, theta));
            }
            StandardGate::CX => self.flip_where(1 << qubits[0], qubits[1]),
            StandardGate::CZ => self.negate_where((1 << qubits[0]) | (1 << qubits[1])),
            StandardGate::Swap => self.swap_bits(qubits[0], qubits[1]),
            StandardGate::CCX => self.flip_where((1 << qubits[0]) | (1 << qubits[1]), qubits[2]),
        }
    }

    // =========================================================================
    // Kernels
    // =========================================================================

    /// Apply the 2x2 matrix `m` to `qubit`.
    fn apply_matrix(&mut self, qubit: usize, m: [[Complex64; 2]; 2]) {
        let mask = 1 << qubit;
        for lo in (0..self.amplitudes.len()).filter(|idx| idx & mask == 0) {
            let hi = lo | mask;
            let (a, b) = (self.amplitudes[lo], self.amplitudes[hi]);
            self.amplitudes[lo] = m[0][0] * a + m[0][1] * b;
            self.amplitudes[hi] = m[1][0] * a + m[1][1] * b;
        }
    }

    /// Scale amplitudes by `d0` where `qubit` is 0 and by `d1` where it is 1.
    fn apply_diagonal(&mut self, qubit: usize, d0: Complex64, d1: Complex64) {
        let mask = 1 << qubit;
        for (idx, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if idx & mask == 0 { d0 } else { d1 };
        }
    }

    /// Flip `target` on every basis state where all bits of `controls` are set.
    fn flip_where(&mut self, controls: usize, target: usize) {
        let tgt_mask = 1 << target;
        for idx in 0..self.amplitudes.len() {
            if idx & controls == controls && idx & tgt_mask == 0 {
                self.amplitudes.swap(idx, idx | tgt_mask);
            }
        }
    }

    /// Negate every amplitude whose index has all bits of `mask` set.
    fn negate_where(&mut self, mask: usize) {
        for (idx, amp) in self.amplitudes.iter_mut().enumerate() {
            if idx & mask == mask {
                *amp = -*amp;
            }
        }
    }

    /// Exchange the values of qubits `a` and `b`.
    fn swap_bits(&mut self, a: usize, b: usize) {
        let (mask_a, mask_b) = (1 << a, 1 << b);
        for idx in 0..self.amplitudes.len() {
            if idx & mask_a != 0 && idx & mask_b == 0 {
                self.amplitudes.swap(idx, (idx & !mask_a) | mask_b);
            }
        }
    }

    // =========================================================================
    // Sampling
    // =========================================================================

    /// Running sum of basis-state probabilities.
    pub fn cumulative_probabilities(&self) -> Vec<f64> {
        self.amplitudes
            .iter()
            .scan(0.0, |acc, amp| {
                *acc += amp.norm_sqr();
                Some(*acc)
            })
            .collect()
    }

    /// Sample a basis-state index from a cumulative distribution.
    pub fn sample_from<R: Rng + ?Sized>(cumulative: &[f64], rng: &mut R) -> usize {
        let total = cumulative.last().copied().unwrap_or(0.0);
        let r: f64 = rng.r#gen::<f64>() * total;
        cumulative
            .partition_point(|&c| c <= r)
            .min(cumulative.len().saturating_sub(1))
    }
}
