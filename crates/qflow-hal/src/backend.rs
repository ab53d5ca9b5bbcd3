//! The seam between the request pipeline and a simulation engine.
//!
//! Sampling requests go through [`Backend::execute`]; evolution snapshots
//! go through [`Backend::statevector`]. Both are async so engines can move
//! their work off the request task.

use async_trait::async_trait;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use qflow_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Name plus free-form settings used to build a backend through
/// [`BackendFactory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// `extra[key]` when it holds a non-negative integer.
    pub fn extra_u64(&self, key: &str) -> Option<u64> {
        self.extra.get(key)?.as_u64()
    }
}

/// Per-run sampling settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub shots: u32,
    /// Return the outcome of every shot, in shot order.
    pub memory: bool,
    /// Fixed sampler seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl RunOptions {
    pub fn new(shots: u32) -> Self {
        Self {
            shots,
            memory: false,
            seed: None,
        }
    }

    pub fn with_memory(self, memory: bool) -> Self {
        Self { memory, ..self }
    }

    pub fn with_seed(self, seed: Option<u64>) -> Self {
        Self { seed, ..self }
    }
}

/// A simulation engine.
///
/// Implementations compute capabilities once at construction. Outcome
/// bitstrings put classical bit 0 rightmost. State vectors are indexed by
/// basis state with qubit 0 as the least significant bit, and ignore
/// measurements.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Registry name.
    fn name(&self) -> &str;

    fn capabilities(&self) -> &Capabilities;

    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Check `circuit` against [`Backend::capabilities`].
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let reasons = self.capabilities().violations(circuit);
        Ok(if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { reasons }
        })
    }

    /// Sample the circuit's measurements `options.shots` times.
    async fn execute(&self, circuit: &Circuit, options: &RunOptions)
    -> HalResult<ExecutionResult>;

    /// Amplitudes after every gate of `circuit` is applied to |0…0⟩.
    async fn statevector(&self, _circuit: &Circuit) -> HalResult<Vec<Complex64>> {
        Err(HalError::Unsupported(format!(
            "backend '{}' cannot compute state vectors",
            self.name()
        )))
    }
}

/// Whether a backend is taking work right now.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    pub is_available: bool,
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Local simulators are never offline.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            status_message: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            status_message: Some(reason.into()),
        }
    }
}

/// Outcome of [`Backend::validate`].
#[derive(Debug, Clone)]
pub enum ValidationResult {
    Valid,
    Invalid { reasons: Vec<String> },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Construction from a [`BackendConfig`], used by the registry.
pub trait BackendFactory: Backend + Sized {
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
