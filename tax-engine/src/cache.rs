//! Time-bounded, in-process cache of the active rule snapshot.
//!
//! One cache instance is shared per process (by reference, inside the
//! engine facade); concurrent calculations read the same snapshot. The
//! cache is a pure, recomputable derivative of the rule store, never a
//! source of truth, so a `clear()` racing an in-flight `load()` is allowed
//! to hand that one call a stale snapshot.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::models::TaxRule;
use crate::store::RuleStore;

/// Cache tuning. Only the TTL is configurable today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a fetched snapshot stays fresh.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(5),
        }
    }
}

/// A fetched rule snapshot. An empty `rules` vector is a valid cached
/// state, distinct from "never loaded" (`None` at the cache level).
#[derive(Debug, Clone)]
struct CachedRuleSet {
    rules: Vec<TaxRule>,
    fetched_at: DateTime<Utc>,
}

impl CachedRuleSet {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at < ttl
    }
}

/// Holds the rule snapshot and refreshes it from the store when stale.
///
/// Load failures never propagate: the previous snapshot (or an empty rule
/// set, if nothing was ever fetched) is served instead and the failure is
/// logged. Availability over correctness, by contract with the checkout
/// flow.
pub struct RuleCache {
    store: Arc<dyn RuleStore>,
    ttl: Duration,
    snapshot: RwLock<Option<CachedRuleSet>>,
}

impl RuleCache {
    pub fn new(store: Arc<dyn RuleStore>, config: CacheConfig) -> Self {
        Self {
            store,
            ttl: config.ttl,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the current rules, refetching from the store if the
    /// snapshot is missing or stale.
    ///
    /// Fetched rules are sorted by `(kind, rate)` ascending so that the
    /// evaluation order (and therefore tie-breaks between identically
    /// named rules) is deterministic across refreshes.
    pub async fn load(&self) -> Vec<TaxRule> {
        {
            let guard = self.snapshot.read().await;
            if let Some(snapshot) = guard.as_ref() {
                if snapshot.is_fresh(Utc::now(), self.ttl) {
                    debug!(rules = snapshot.rules.len(), "serving cached rule set");
                    return snapshot.rules.clone();
                }
            }
        }

        match self.store.list_active_rules().await {
            Ok(mut rules) => {
                rules.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.rate.cmp(&b.rate)));
                debug!(rules = rules.len(), "refreshed rule set from store");
                let mut guard = self.snapshot.write().await;
                *guard = Some(CachedRuleSet {
                    rules: rules.clone(),
                    fetched_at: Utc::now(),
                });
                rules
            }
            Err(error) => {
                let guard = self.snapshot.read().await;
                match guard.as_ref() {
                    Some(snapshot) => {
                        warn!(%error, "rule store fetch failed; serving last good snapshot");
                        snapshot.rules.clone()
                    }
                    None => {
                        warn!(%error, "rule store fetch failed with nothing cached; using empty rule set");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Drops the snapshot so the next `load()` refetches unconditionally,
    /// TTL notwithstanding. Invalidation hook for rule edits.
    pub async fn clear(&self) {
        let mut guard = self.snapshot.write().await;
        *guard = None;
        debug!("rule cache cleared");
    }
}
