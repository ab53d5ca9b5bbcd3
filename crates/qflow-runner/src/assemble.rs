//! Circuit assembly.
//!
//! Both request paths feed records through [`apply_gates`]; they differ only
//! in the [`GateFailurePolicy`] they pass.

use qflow_ir::Circuit;
use tracing::{debug, warn};

use crate::columns::build_columns;
use crate::error::{RunnerError, RunnerResult};
use crate::normalize::{Normalized, apply_normalized, normalize};
use crate::record::GateRecord;

/// What to do when a known gate cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateFailurePolicy {
    /// Fail the whole request.
    Abort,
    /// Log a warning and continue with the next gate.
    SkipAndWarn,
}

/// Tally of one [`apply_gates`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Gates appended to the circuit.
    pub applied: usize,
    /// Unknown gate kinds.
    pub ignored: usize,
    /// Gates dropped under [`GateFailurePolicy::SkipAndWarn`].
    pub skipped: usize,
}

/// Normalize each record and append it to `circuit`.
pub fn apply_gates<'a>(
    circuit: &mut Circuit,
    records: impl IntoIterator<Item = &'a GateRecord>,
    policy: GateFailurePolicy,
) -> RunnerResult<ApplyReport> {
    let mut report = ApplyReport::default();

    for record in records {
        let outcome = normalize(record).and_then(|normalized| match normalized {
            Normalized::Apply(gate) => {
                apply_normalized(circuit, &record.kind, &gate).map(|()| true)
            }
            Normalized::Ignored(tag) => {
                warn!(gate = record.label(), "Ignoring unknown gate type '{}'", tag);
                Ok(false)
            }
        });

        match (outcome, policy) {
            (Ok(true), _) => report.applied += 1,
            (Ok(false), _) => report.ignored += 1,
            (Err(e), GateFailurePolicy::Abort) => return Err(e),
            (Err(e), GateFailurePolicy::SkipAndWarn) => {
                warn!(gate = record.label(), "Skipping gate {}: {}", record.kind, e);
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// Build the measured circuit for a shot-based run.
///
/// Gates are applied in column order and any bad gate aborts. Every qubit is
/// then measured into the classical bit of the same index.
pub fn assemble_circuit(num_qubits: u32, records: &[GateRecord]) -> RunnerResult<Circuit> {
    let mut circuit = Circuit::with_size("request", num_qubits, num_qubits);

    let columns = build_columns(records);
    let ordered = columns.iter().flat_map(|column| column.gates.iter().copied());
    let report = apply_gates(&mut circuit, ordered, GateFailurePolicy::Abort)?;
    debug!(
        applied = report.applied,
        ignored = report.ignored,
        "Assembled circuit over {} qubits",
        num_qubits
    );

    circuit
        .measure_all()
        .map_err(|e| RunnerError::ExecutionFailed(e.to_string()))?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qflow_ir::{InstructionKind, QubitId, StandardGate};

    #[test]
    fn test_assemble_orders_by_column() {
        let records = vec![
            GateRecord::new("cx").on(0).with_targets([1]).at(1),
            GateRecord::new("h").on(0).at(0),
        ];
        let circuit = assemble_circuit(2, &records).unwrap();

        let kinds: Vec<_> = circuit.instructions().iter().map(|i| i.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                InstructionKind::Gate(StandardGate::H),
                InstructionKind::Gate(StandardGate::CX),
                InstructionKind::Measure,
            ]
        );
        assert_eq!(circuit.num_clbits(), 2);
        let measure = circuit.instructions().last().unwrap();
        assert_eq!(measure.qubits, vec![QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_assemble_aborts_on_bad_gate() {
        let records = vec![
            GateRecord::new("h").on(0),
            GateRecord::new("cnot").on(0),
        ];
        let err = assemble_circuit(2, &records).unwrap_err();
        assert!(matches!(err, RunnerError::InvalidGateSpec { .. }));
    }

    #[test]
    fn test_assemble_aborts_on_out_of_range_qubit() {
        let records = vec![GateRecord::new("x").on(3)];
        assert!(assemble_circuit(2, &records).is_err());
    }

    #[test]
    fn test_unknown_gates_do_not_abort() {
        let records = vec![GateRecord::new("u3").on(0), GateRecord::new("x").on(0)];
        let circuit = assemble_circuit(1, &records).unwrap();
        assert_eq!(circuit.num_gates(), 1);
    }

    #[test]
    fn test_skip_policy_reports() {
        let records = vec![
            GateRecord::new("h").on(0),
            GateRecord::new("toffoli").with_controls([0]),
            GateRecord::new("mystery"),
            GateRecord::new("x").on(0),
        ];
        let mut circuit = Circuit::with_size("t", 1, 0);
        let report = apply_gates(&mut circuit, &records, GateFailurePolicy::SkipAndWarn).unwrap();

        assert_eq!(
            report,
            ApplyReport {
                applied: 2,
                ignored: 1,
                skipped: 1,
            }
        );
        assert_eq!(circuit.num_gates(), 2);
    }
}
