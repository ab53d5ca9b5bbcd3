//! QuantumFlow API server.
//!
//! HTTP front end for the circuit runner:
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | GET | `/health` | Liveness and default-backend status |
//! | POST | `/api/v1/execute` | Sample measurement outcomes |
//! | POST | `/api/v1/execute-evolution` | State vector after each column |
//! | GET | `/api/v1/backends` | Registered backends |
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use qflow_server::{AppState, ServiceConfig, create_router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::from_env()?;
//!     let bind = config.bind_address();
//!     let app = create_router(Arc::new(AppState::new(config)));
//!
//!     let listener = tokio::net::TcpListener::bind(bind).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod server;
pub mod state;
pub mod tracing_config;

pub use config::{AllowedOrigins, ConfigError, ServiceConfig};
pub use dto::{
    BackendSummary, EvolutionResponse, ExecuteRequest, ExecuteResponse, HealthResponse,
};
pub use error::ApiError;
pub use server::create_router;
pub use state::AppState;
pub use tracing_config::{TracingFormat, init_tracing};
