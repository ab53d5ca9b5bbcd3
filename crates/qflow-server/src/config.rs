//! Service configuration.
//!
//! Read once at start-up from the process environment (after loading an
//! optional `.env` file) and passed explicitly into [`crate::AppState`].
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ALLOWED_ORIGINS` | `*` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8000` |
//! | `QISKIT_BACKEND` | `aer_simulator` |
//! | `QFLOW_MAX_QUBITS` | `20` |
//! | `QFLOW_LOG_FORMAT` | `console` |

use axum::http::HeaderValue;
use qflow_adapter_sim::{AER_SIMULATOR, DEFAULT_MAX_QUBITS};

use crate::tracing_config::TracingFormat;

/// Origins allowed by CORS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin, without credentials.
    Any,
    /// Exactly these origins, with credentials.
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Parse a comma-separated origin list; `*` anywhere means [`AllowedOrigins::Any`].
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|o| o == "*") {
            return Ok(AllowedOrigins::Any);
        }
        if let Some(bad) = origins.iter().find(|o| HeaderValue::from_str(o).is_err()) {
            return Err(ConfigError::InvalidValue {
                var: "ALLOWED_ORIGINS",
                value: bad.clone(),
            });
        }
        Ok(AllowedOrigins::List(origins))
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// CORS origins.
    pub allowed_origins: AllowedOrigins,
    /// Backend used when a request names none.
    pub default_backend: String,
    /// Simulator register size limit.
    pub max_qubits: u32,
    /// Log output format.
    pub log_format: TracingFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: AllowedOrigins::Any,
            default_backend: AER_SIMULATOR.to_string(),
            max_qubits: DEFAULT_MAX_QUBITS,
            log_format: TracingFormat::Console,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            config.allowed_origins = AllowedOrigins::parse(&origins)?;
        }
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(backend) = lookup("QISKIT_BACKEND") {
            config.default_backend = backend;
        }
        if let Some(max) = lookup("QFLOW_MAX_QUBITS") {
            config.max_qubits = max.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "QFLOW_MAX_QUBITS",
                value: max.clone(),
            })?;
        }
        if let Some(format) = lookup("QFLOW_LOG_FORMAT") {
            config.log_format = match format.as_str() {
                "json" => TracingFormat::Json,
                _ => TracingFormat::Console,
            };
        }

        Ok(config)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}
