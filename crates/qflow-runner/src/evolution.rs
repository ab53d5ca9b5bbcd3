//! State evolution: one state-vector snapshot per column.

use num_complex::Complex64;
use qflow_hal::Backend;
use qflow_ir::Circuit;
use tracing::{debug, instrument};

use crate::assemble::{GateFailurePolicy, apply_gates};
use crate::columns::build_columns;
use crate::error::{RunnerError, RunnerResult};
use crate::record::GateRecord;

/// Snapshots before any gate and after each occupied column.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// Formatted amplitudes, one list per snapshot, indexed by basis state.
    pub snapshots: Vec<Vec<String>>,
}

/// Format an amplitude as `re±imj` with five decimals, e.g. `0.70711+0.00000j`.
///
/// Signed zeros print as `0.00000`.
pub fn format_amplitude(amplitude: Complex64) -> String {
    // -0.0 + 0.0 == +0.0
    format!("{:.5}{:+.5}j", amplitude.re + 0.0, amplitude.im + 0.0)
}

async fn snapshot(
    backend: &dyn Backend,
    circuit: &Circuit,
    column: Option<i64>,
) -> RunnerResult<Vec<String>> {
    let amplitudes = backend.statevector(circuit).await.map_err(|e| {
        RunnerError::SnapshotComputationFailed {
            column,
            reason: e.to_string(),
        }
    })?;
    Ok(amplitudes.into_iter().map(format_amplitude).collect())
}

/// Walk the columns in order, snapshotting the state after each.
///
/// No measurement is appended. A gate that cannot be applied is skipped with
/// a warning; only a failing state-vector computation aborts.
#[instrument(skip_all, fields(num_qubits = num_qubits, backend = backend.name()))]
pub async fn get_state_evolution(
    backend: &dyn Backend,
    num_qubits: u32,
    gates: &[GateRecord],
) -> RunnerResult<EvolutionResult> {
    let columns = build_columns(gates);
    let mut circuit = Circuit::with_size("evolution", num_qubits, 0);

    let mut snapshots = Vec::with_capacity(columns.len() + 1);
    snapshots.push(snapshot(backend, &circuit, None).await?);

    for column in &columns {
        let report = apply_gates(
            &mut circuit,
            column.gates.iter().copied(),
            GateFailurePolicy::SkipAndWarn,
        )?;
        debug!(
            column = column.position,
            applied = report.applied,
            skipped = report.skipped,
            "Column applied"
        );
        snapshots.push(snapshot(backend, &circuit, Some(column.position)).await?);
    }

    Ok(EvolutionResult { snapshots })
}
