use async_trait::async_trait;
use tax_engine::models::TaxRule;
use tax_engine::store::{RuleStore, RuleStoreError};
use tokio::sync::RwLock;

/// Rule store backed by process memory.
///
/// `list_active_rules` filters on the `active` flag at "storage" level,
/// the way a real backend's query would; `replace_rules` stands in for
/// out-of-band rule edits.
pub struct MemoryRuleStore {
    rules: RwLock<Vec<TaxRule>>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::with_rules(Vec::new())
    }

    pub fn with_rules(rules: Vec<TaxRule>) -> Self {
        Self {
            rules: RwLock::new(rules),
        }
    }

    /// Replaces the whole rule set, as an admin rule edit would.
    /// Engines holding a cached snapshot will not observe the change
    /// until their TTL lapses or their cache is cleared.
    pub async fn replace_rules(&self, rules: Vec<TaxRule>) {
        *self.rules.write().await = rules;
    }
}

impl Default for MemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn list_active_rules(&self) -> Result<Vec<TaxRule>, RuleStoreError> {
        let rules = self.rules.read().await;
        Ok(rules.iter().filter(|r| r.active).cloned().collect())
    }
}
