//! QuantumFlow Backend Abstraction Layer
//!
//! This crate provides the narrow interface between circuit construction and
//! the simulation engine that actually executes circuits.
//!
//! # Overview
//!
//! - A common [`Backend`] trait with exactly the operations the service needs:
//!   shot-based sampling ([`Backend::execute`]) and exact state-vector
//!   snapshots ([`Backend::statevector`])
//! - [`Capabilities`] to describe register size, shot limits and gate set
//! - A [`BackendRegistry`] mapping backend names to factories
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Implementing a Custom Backend
//!
//! ```ignore
//! use qflow_hal::{
//!     Backend, BackendAvailability, Capabilities, ExecutionResult, HalResult, RunOptions,
//! };
//! use qflow_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn availability(&self) -> HalResult<BackendAvailability> {
//!         Ok(BackendAvailability::always_available())
//!     }
//!
//!     async fn execute(&self, circuit: &Circuit, options: &RunOptions) -> HalResult<ExecutionResult> {
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod registry;
pub mod result;

pub use backend::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, RunOptions, ValidationResult,
};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use registry::BackendRegistry;
pub use result::{Counts, ExecutionResult};
