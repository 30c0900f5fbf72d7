use std::sync::Arc;

use async_trait::async_trait;
use tax_engine::store::{RuleStore, RuleStoreError, RuleStoreFactory, StoreConfig};

use crate::store::MemoryRuleStore;

/// Registers the `memory` backend with a `RuleStoreRegistry`.
///
/// The connection string is ignored — every `create` call produces a
/// fresh, empty store.
pub struct MemoryStoreFactory;

#[async_trait]
impl RuleStoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, _config: &StoreConfig) -> Result<Arc<dyn RuleStore>, RuleStoreError> {
        Ok(Arc::new(MemoryRuleStore::new()))
    }
}
