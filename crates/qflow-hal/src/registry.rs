//! Name-to-factory lookup for simulation backends.
//!
//! Besides the by-name table the registry holds at most one *preferred*
//! factory, selected only when a request names it exactly.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backend::{Backend, BackendConfig, BackendFactory};
use crate::error::{HalError, HalResult};

type Factory = Box<dyn Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync>;

/// Every backend the service can build, keyed by name.
pub struct BackendRegistry {
    preferred: Option<(String, Factory)>,
    by_name: FxHashMap<String, Factory>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            preferred: None,
            by_name: FxHashMap::default(),
        }
    }

    /// Build `B` through [`BackendFactory::from_config`] when `name` is requested.
    pub fn register<B>(&mut self, name: impl Into<String>)
    where
        B: BackendFactory + 'static,
    {
        self.register_factory(name, |config| {
            B::from_config(config).map(|b| Box::new(b) as Box<dyn Backend>)
        });
    }

    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!(backend = %name, "registered backend");
        self.by_name.insert(name, Box::new(factory));
    }

    /// Replace the preferred factory.
    pub fn set_preferred(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!(backend = %name, "registered preferred backend");
        self.preferred = Some((name, Box::new(factory)));
    }

    pub fn preferred_name(&self) -> Option<&str> {
        self.preferred.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn create_preferred(&self, config: BackendConfig) -> HalResult<Box<dyn Backend>> {
        let (_, factory) = self.preferred.as_ref().ok_or_else(|| {
            HalError::BackendUnavailable("no preferred backend is registered".into())
        })?;
        factory(config)
    }

    /// Build the backend registered under `name` in the by-name table.
    pub fn create(&self, name: &str, config: BackendConfig) -> HalResult<Box<dyn Backend>> {
        let factory = self.by_name.get(name).ok_or_else(|| {
            HalError::BackendUnavailable(format!("no backend registered as '{name}'"))
        })?;
        factory(config)
    }

    /// Sorted, deduplicated names, preferred included.
    pub fn available_backends(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .by_name
            .keys()
            .map(String::as_str)
            .chain(self.preferred_name())
            .map(String::from)
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn has_backend(&self, name: &str) -> bool {
        self.by_name.contains_key(name) || self.preferred_name() == Some(name)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
