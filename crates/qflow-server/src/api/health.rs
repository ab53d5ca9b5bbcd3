//! Health check endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};
use qflow_runner::resolve_backend;
use tracing::debug;

use crate::dto::HealthResponse;
use crate::state::AppState;

/// GET /health - Health check endpoint.
///
/// Always 200; `qiskit` reports whether the default backend can be used.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let default_backend = &state.config.default_backend;
    let engine_ok = match resolve_backend(&state.registry, default_backend) {
        Ok(backend) => match backend.availability().await {
            Ok(availability) if availability.is_available => true,
            Ok(availability) => {
                debug!(
                    backend = %default_backend,
                    reason = availability.status_message.as_deref().unwrap_or("unknown"),
                    "default backend offline"
                );
                false
            }
            Err(e) => {
                debug!(backend = %default_backend, error = %e, "availability check failed");
                false
            }
        },
        Err(e) => {
            debug!(backend = %default_backend, error = %e, "default backend unresolved");
            false
        }
    };

    Json(HealthResponse {
        status: "ok",
        qiskit: engine_ok,
        backend_env: default_backend.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
