//! Backend listing endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};
use qflow_hal::BackendConfig;

use crate::dto::BackendSummary;
use crate::state::AppState;

/// GET /api/v1/backends - List all registered backends.
pub async fn list_backends(State(state): State<Arc<AppState>>) -> Json<Vec<BackendSummary>> {
    let registry = &state.registry;
    let preferred = registry.preferred_name();
    let names = registry.available_backends();
    let mut summaries = Vec::with_capacity(names.len());

    for name in names {
        let is_preferred = preferred == Some(name.as_str());
        let created = if is_preferred {
            registry.create_preferred(BackendConfig::new(&name))
        } else {
            registry.create(&name, BackendConfig::new(&name))
        };

        let summary = match created {
            Ok(backend) => {
                let available = backend
                    .availability()
                    .await
                    .map(|a| a.is_available)
                    .unwrap_or(false);
                let caps = backend.capabilities();
                BackendSummary {
                    name,
                    preferred: is_preferred,
                    is_simulator: caps.is_simulator,
                    num_qubits: caps.num_qubits,
                    max_shots: caps.max_shots,
                    available,
                    native_gates: caps.gate_set.native.clone(),
                }
            }
            Err(e) => {
                tracing::warn!("Backend '{}' could not be created: {}", name, e);
                BackendSummary {
                    name,
                    preferred: is_preferred,
                    is_simulator: false,
                    num_qubits: 0,
                    max_shots: 0,
                    available: false,
                    native_gates: Vec::new(),
                }
            }
        };
        summaries.push(summary);
    }

    Json(summaries)
}
