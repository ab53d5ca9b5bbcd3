//! Scriptable backend for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use num_complex::Complex64;
use qflow_hal::{
    Backend, BackendAvailability, BackendRegistry, Capabilities, Counts, ExecutionResult,
    HalError, HalResult, RunOptions,
};
use qflow_ir::Circuit;

/// Returns fixed counts and the |0…0⟩ state, or fails on demand.
pub(crate) struct FakeBackend {
    name: String,
    capabilities: Capabilities,
    counts: Counts,
    failure: Option<String>,
    statevector_budget: Option<usize>,
    statevector_calls: AtomicUsize,
}

impl FakeBackend {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            capabilities: Capabilities::simulator(name, 8),
            counts: Counts::new(),
            failure: None,
            statevector_budget: None,
            statevector_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_counts(mut self, counts: &[(&str, u64)]) -> Self {
        self.counts = counts.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        self
    }

    pub(crate) fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Succeed for the first `calls` state-vector queries, then fail.
    pub(crate) fn statevector_budget(mut self, calls: usize) -> Self {
        self.statevector_budget = Some(calls);
        self
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn execute(&self, _circuit: &Circuit, options: &RunOptions) -> HalResult<ExecutionResult> {
        match &self.failure {
            Some(message) => Err(HalError::ExecutionFailed(message.clone())),
            None => Ok(ExecutionResult::new(self.counts.clone(), options.shots)),
        }
    }

    async fn statevector(&self, circuit: &Circuit) -> HalResult<Vec<Complex64>> {
        let call = self.statevector_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(HalError::ExecutionFailed(message.clone()));
        }
        if self.statevector_budget.is_some_and(|budget| call >= budget) {
            return Err(HalError::Backend("out of memory".into()));
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << circuit.num_qubits()];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(amplitudes)
    }
}

/// Registry whose factories all build a [`FakeBackend`] named after the config.
pub(crate) fn registry_with(preferred: &[&str], named: &[&str]) -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    if let Some(name) = preferred.first() {
        registry.set_preferred(*name, |config| Ok(Box::new(FakeBackend::new(&config.name))));
    }
    for name in named {
        registry.register_factory(*name, |config| Ok(Box::new(FakeBackend::new(&config.name))));
    }
    registry
}
