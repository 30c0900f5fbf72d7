use async_trait::async_trait;
use thiserror::Error;

use crate::models::TaxRule;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleStoreError {
    #[error("Store error: {0}")]
    Backend(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Read-side seam to the external rule store.
///
/// The store is the source of truth for tax rules; the engine only ever
/// reads from it, and only through this one operation. Implementations
/// decide what "active" means at the storage level — the engine still
/// checks `rule.active` defensively when filtering.
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn list_active_rules(&self) -> Result<Vec<TaxRule>, RuleStoreError>;
}
