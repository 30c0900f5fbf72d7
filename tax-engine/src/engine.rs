//! The engine facade the checkout flow talks to.
//!
//! Owns the rule cache and orchestrates filter → calculate → aggregate.
//! `calculate` is infallible by signature: connectivity problems degrade
//! to zero applicable rules instead of failing the checkout. Callers that
//! need strict correctness call `validate` first and decide for themselves
//! whether to block.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::cache::{CacheConfig, RuleCache};
use crate::calculations::aggregate::aggregate;
use crate::calculations::applicability::{applicable_rules, region_matches_location};
use crate::models::{CalculationInput, CalculationResult, LocationTaxSummary, ValidationReport};
use crate::store::RuleStore;
use crate::validator::{rule_set_warnings, validate_input};

pub struct TaxEngine {
    cache: RuleCache,
}

impl TaxEngine {
    /// Engine with the default cache TTL (5 minutes).
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self::with_config(store, CacheConfig::default())
    }

    pub fn with_config(store: Arc<dyn RuleStore>, config: CacheConfig) -> Self {
        Self {
            cache: RuleCache::new(store, config),
        }
    }

    /// Computes the tax breakdown and grand total for one order.
    ///
    /// Always succeeds. A rule store outage, a stale cache, or a rule set
    /// nothing in the order matches all resolve to fewer (possibly zero)
    /// line items, never to an error.
    pub async fn calculate(&self, input: &CalculationInput) -> CalculationResult {
        if let Some(requester) = &input.requester {
            debug!(%requester, subtotal = %input.subtotal, "tax calculation requested");
        }
        let rules = self.cache.load().await;
        aggregate(&rules, input)
    }

    /// Pre-submit validation: blocking errors plus advisory warnings about
    /// the rule configuration the input would resolve to.
    ///
    /// Reloads the cache independently of `calculate` — the two calls may
    /// run at different times within a checkout session and may observe
    /// different snapshots. Acceptable: validation is advisory, not
    /// authoritative.
    pub async fn validate(&self, input: &CalculationInput) -> ValidationReport {
        let mut report = validate_input(input);
        let rules = self.cache.load().await;
        let applicable = applicable_rules(&rules, input);
        report.warnings.extend(rule_set_warnings(&applicable));
        report
    }

    /// Rules in force at a location, without a cart.
    ///
    /// Amount thresholds are ignored (unknowable without an order) and
    /// fixed-amount rules are listed but excluded from the estimated
    /// combined rate, since a flat charge is not a rate.
    pub async fn summarize_for_location(
        &self,
        state: &str,
        city: Option<&str>,
    ) -> LocationTaxSummary {
        let rules = self.cache.load().await;
        let matched: Vec<_> = rules
            .into_iter()
            .filter(|r| r.active && region_matches_location(r, state, city))
            .collect();

        let estimated_combined_rate: Decimal = matched
            .iter()
            .filter(|r| r.kind.is_percentage())
            .map(|r| r.rate)
            .sum();

        LocationTaxSummary {
            state: state.to_string(),
            city: city.map(str::to_string),
            rules: matched,
            estimated_combined_rate,
        }
    }

    /// Invalidation hook for after rule edits: the next `calculate` or
    /// `validate` refetches from the store regardless of TTL.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}
