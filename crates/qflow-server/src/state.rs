//! Application state for the API server.

use qflow_adapter_sim::register_simulators;
use qflow_hal::BackendRegistry;

use crate::config::ServiceConfig;

/// Shared application state.
///
/// Read-only after start-up; each request creates its own backend instance.
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,
    /// Backend factories.
    pub registry: BackendRegistry,
}

impl AppState {
    /// Create state with the local simulators registered.
    pub fn new(config: ServiceConfig) -> Self {
        let mut registry = BackendRegistry::new();
        register_simulators(&mut registry, config.max_qubits);
        Self { config, registry }
    }

    /// Create state with a custom registry.
    pub fn with_registry(config: ServiceConfig, registry: BackendRegistry) -> Self {
        Self { config, registry }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
