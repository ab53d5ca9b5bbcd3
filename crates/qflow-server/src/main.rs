//! QuantumFlow server binary entry point.

use std::sync::Arc;

use qflow_server::{AppState, ServiceConfig, create_router, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_format)?;

    let bind_addr = config.bind_address();
    tracing::info!(
        default_backend = %config.default_backend,
        max_qubits = config.max_qubits,
        "Loaded configuration"
    );

    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    tracing::info!("Starting QuantumFlow API at http://{}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
