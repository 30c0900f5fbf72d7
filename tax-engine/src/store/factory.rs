use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::rule_store::{RuleStore, RuleStoreError};

/// Which rule-store backend to open, and how.
///
/// `backend` selects a factory registered under that name.
/// `connection_string` means whatever the chosen backend says it means —
/// a URI for a document store, nothing at all for the in-memory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }
}

/// Opens store handles for one backend.
///
/// A deployment registers one factory per backend it ships and picks
/// between them at startup through [`StoreConfig`], keeping the engine
/// itself ignorant of where rules live.
#[async_trait]
pub trait RuleStoreFactory: Send + Sync {
    /// Lowercase name this factory answers to (e.g. `"memory"`).
    fn backend_name(&self) -> &'static str;

    /// Produce a ready store handle for `config`. Implementations may
    /// warm connections or seed state here.
    async fn create(&self, config: &StoreConfig) -> Result<Arc<dyn RuleStore>, RuleStoreError>;
}

/// Maps backend names to their factories.
///
/// Built once at startup: register every backend the binary ships, then
/// hand the registry a [`StoreConfig`] whenever a store handle is needed.
pub struct RuleStoreRegistry {
    factories: HashMap<&'static str, Box<dyn RuleStoreFactory>>,
}

impl RuleStoreRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Adds `factory` under its backend name. Registering a second
    /// factory under the same name replaces the first.
    pub fn register(&mut self, factory: Box<dyn RuleStoreFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names, alphabetical.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens a store through the factory named by `config.backend`.
    ///
    /// # Errors
    /// * [`RuleStoreError::Configuration`] — nothing is registered under
    ///   that name.
    /// * Whatever the chosen factory returns.
    pub async fn create(&self, config: &StoreConfig) -> Result<Arc<dyn RuleStore>, RuleStoreError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RuleStoreError::Configuration(format!(
                    "no rule store backend named '{}' is registered (have: {:?})",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for RuleStoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}
