//! End-to-end tests of the engine facade against real store backends.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tax_engine::models::{CalculationInput, Destination, OrderItem, TaxRule, TaxRuleKind};
use tax_engine::store::{RuleStore, RuleStoreError};
use tax_engine::{CacheConfig, TaxEngine};
use tax_store_memory::MemoryRuleStore;

fn rule(id: &str, kind: TaxRuleKind, rate: Decimal) -> TaxRule {
    TaxRule {
        id: id.to_string(),
        name: id.to_string(),
        kind,
        rate,
        min_order_amount: None,
        max_order_amount: None,
        applicable_regions: Vec::new(),
        applicable_categories: Vec::new(),
        active: true,
    }
}

fn order(subtotal: Decimal, shipping_fee: Decimal) -> CalculationInput {
    CalculationInput {
        subtotal,
        shipping_fee,
        items: vec![OrderItem {
            id: "i-1".to_string(),
            name: "Kaju Katli".to_string(),
            unit_price: subtotal,
            quantity: 1,
            category: "Sweets".to_string(),
        }],
        destination: Destination {
            state: "Karnataka".to_string(),
            city: "Bengaluru".to_string(),
            postal_code: "560001".to_string(),
        },
        requester: Some("checkout-service".to_string()),
    }
}

/// Counts fetches so tests can prove whether the cache refetched.
struct CountingStore {
    inner: MemoryRuleStore,
    fetches: AtomicUsize,
}

impl CountingStore {
    fn new(rules: Vec<TaxRule>) -> Self {
        Self {
            inner: MemoryRuleStore::with_rules(rules),
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RuleStore for CountingStore {
    async fn list_active_rules(&self) -> Result<Vec<TaxRule>, RuleStoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.list_active_rules().await
    }
}

/// A store that is always down.
struct DownStore;

#[async_trait]
impl RuleStore for DownStore {
    async fn list_active_rules(&self) -> Result<Vec<TaxRule>, RuleStoreError> {
        Err(RuleStoreError::Connection("store unreachable".to_string()))
    }
}

// =============================================================================
// calculate
// =============================================================================

#[tokio::test]
async fn empty_rule_set_yields_subtotal_plus_shipping() {
    let engine = TaxEngine::new(Arc::new(MemoryRuleStore::new()));

    let result = engine.calculate(&order(dec!(1000.00), dec!(50.00))).await;

    assert_eq!(result.total_tax, dec!(0.00));
    assert_eq!(result.grand_total, dec!(1050.00));
    assert!(result.line_items.is_empty());
}

#[tokio::test]
async fn single_unrestricted_subtotal_rule() {
    // Scenario: subtotal 1000, shipping 50, one 18% rule on the subtotal.
    let store = MemoryRuleStore::with_rules(vec![rule(
        "gst",
        TaxRuleKind::PercentageOfSubtotal,
        dec!(18),
    )]);
    let engine = TaxEngine::new(Arc::new(store));

    let result = engine.calculate(&order(dec!(1000.00), dec!(50.00))).await;

    assert_eq!(result.line_items.len(), 1);
    assert_eq!(result.line_items[0].amount, dec!(180.00));
    assert_eq!(result.total_tax, dec!(180.00));
    assert_eq!(result.grand_total, dec!(1230.00));
}

#[tokio::test]
async fn regional_and_category_rules_combine() {
    // Delhi order of sweets: a 5% Delhi rule plus a 3% sweets rule.
    let mut delhi = rule("delhi-vat", TaxRuleKind::PercentageOfSubtotal, dec!(5));
    delhi.applicable_regions = vec!["Delhi".to_string()];
    let mut sweets = rule("sweets-cess", TaxRuleKind::PercentageOfItems, dec!(3));
    sweets.applicable_categories = vec!["Sweets".to_string()];

    let store = MemoryRuleStore::with_rules(vec![delhi, sweets]);
    let engine = TaxEngine::new(Arc::new(store));

    let input = CalculationInput {
        subtotal: dec!(400.00),
        shipping_fee: dec!(0.00),
        items: vec![OrderItem {
            id: "i-1".to_string(),
            name: "Kaju Katli".to_string(),
            unit_price: dec!(200.00),
            quantity: 2,
            category: "Sweets".to_string(),
        }],
        destination: Destination {
            state: "Delhi".to_string(),
            city: "New Delhi".to_string(),
            postal_code: "110001".to_string(),
        },
        requester: None,
    };

    let result = engine.calculate(&input).await;

    assert_eq!(result.line_items.len(), 2);
    assert_eq!(result.line_items[0].amount, dec!(20.00)); // 400 × 5%
    assert_eq!(result.line_items[1].amount, dec!(12.00)); // 400 × 3%, all items match
    assert_eq!(result.total_tax, dec!(32.00));
    assert_eq!(result.grand_total, dec!(432.00));
}

#[tokio::test]
async fn calculate_is_idempotent_for_unchanged_rules() {
    let store = MemoryRuleStore::with_rules(vec![
        rule("gst", TaxRuleKind::PercentageOfSubtotal, dec!(18)),
        rule("levy", TaxRuleKind::FixedAmount, dec!(25.00)),
    ]);
    let engine = TaxEngine::new(Arc::new(store));
    let input = order(dec!(999.99), dec!(49.50));

    let first = engine.calculate(&input).await;
    let second = engine.calculate(&input).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn region_matching_is_case_insensitive_end_to_end() {
    let mut karnataka = rule("ka-vat", TaxRuleKind::PercentageOfSubtotal, dec!(10));
    karnataka.applicable_regions = vec!["karnataka".to_string()];
    let engine = TaxEngine::new(Arc::new(MemoryRuleStore::with_rules(vec![karnataka])));

    let mut input = order(dec!(100.00), dec!(0.00));
    input.destination.state = "KARNATAKA".to_string();

    let result = engine.calculate(&input).await;

    assert_eq!(result.total_tax, dec!(10.00));
}

#[tokio::test]
async fn min_order_amount_boundary_is_inclusive() {
    let mut threshold = rule("big-order", TaxRuleKind::PercentageOfSubtotal, dec!(10));
    threshold.min_order_amount = Some(dec!(1000.00));
    let engine = TaxEngine::new(Arc::new(MemoryRuleStore::with_rules(vec![threshold])));

    let below = engine.calculate(&order(dec!(999.99), dec!(0.00))).await;
    let at = engine.calculate(&order(dec!(1000.00), dec!(0.00))).await;

    assert_eq!(below.total_tax, dec!(0.00));
    assert_eq!(at.total_tax, dec!(100.00));
}

// =============================================================================
// fail-open behavior
// =============================================================================

#[tokio::test]
async fn store_outage_degrades_to_zero_tax() {
    let engine = TaxEngine::new(Arc::new(DownStore));

    let result = engine.calculate(&order(dec!(1000.00), dec!(50.00))).await;

    assert_eq!(result.total_tax, dec!(0.00));
    assert_eq!(result.grand_total, dec!(1050.00));
}

// =============================================================================
// cache behavior through the facade
// =============================================================================

#[tokio::test]
async fn clear_cache_forces_refetch_within_ttl() {
    let store = Arc::new(CountingStore::new(vec![rule(
        "gst",
        TaxRuleKind::PercentageOfSubtotal,
        dec!(18),
    )]));
    let engine = TaxEngine::new(store.clone());
    let input = order(dec!(100.00), dec!(0.00));

    engine.calculate(&input).await;
    engine.calculate(&input).await;
    assert_eq!(store.fetches.load(Ordering::SeqCst), 1);

    engine.clear_cache().await;
    engine.calculate(&input).await;
    assert_eq!(store.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn rule_edits_are_invisible_until_cache_cleared() {
    let store = Arc::new(MemoryRuleStore::with_rules(vec![rule(
        "gst",
        TaxRuleKind::PercentageOfSubtotal,
        dec!(18),
    )]));
    let engine = TaxEngine::new(store.clone());
    let input = order(dec!(100.00), dec!(0.00));

    assert_eq!(engine.calculate(&input).await.total_tax, dec!(18.00));

    store
        .replace_rules(vec![rule("gst", TaxRuleKind::PercentageOfSubtotal, dec!(12))])
        .await;

    // Still the cached 18% within the TTL window.
    assert_eq!(engine.calculate(&input).await.total_tax, dec!(18.00));

    engine.clear_cache().await;
    assert_eq!(engine.calculate(&input).await.total_tax, dec!(12.00));
}

#[tokio::test]
async fn zero_ttl_refetches_every_calculation() {
    let store = Arc::new(CountingStore::new(Vec::new()));
    let engine = TaxEngine::with_config(
        store.clone(),
        CacheConfig {
            ttl: chrono::Duration::zero(),
        },
    );
    let input = order(dec!(100.00), dec!(0.00));

    engine.calculate(&input).await;
    engine.calculate(&input).await;

    assert_eq!(store.fetches.load(Ordering::SeqCst), 2);
}

// =============================================================================
// validate
// =============================================================================

#[tokio::test]
async fn validate_merges_input_errors_and_rule_warnings() {
    let store = MemoryRuleStore::with_rules(vec![
        rule("gst", TaxRuleKind::PercentageOfSubtotal, dec!(28)),
        rule("vat", TaxRuleKind::PercentageOfSubtotal, dec!(25)),
    ]);
    let engine = TaxEngine::new(Arc::new(store));

    let mut input = order(dec!(1000.00), dec!(0.00));
    input.destination.postal_code = String::new();

    let report = engine.validate(&input).await;

    assert!(report.valid); // warnings only, no errors
    assert!(report.errors.is_empty());
    // Postal warning + overlapping broad rules + combined rate over 50.
    assert_eq!(report.warnings.len(), 3);
}

#[tokio::test]
async fn validate_never_blocks_calculate() {
    let engine = TaxEngine::new(Arc::new(MemoryRuleStore::with_rules(vec![rule(
        "gst",
        TaxRuleKind::PercentageOfSubtotal,
        dec!(18),
    )])));

    let mut input = order(dec!(100.00), dec!(0.00));
    input.items.clear(); // invalid: no items

    let report = engine.validate(&input).await;
    assert!(!report.valid);

    // calculate still proceeds and still applies the subtotal rule.
    let result = engine.calculate(&input).await;
    assert_eq!(result.total_tax, dec!(18.00));
}

// =============================================================================
// summarize_for_location
// =============================================================================

#[tokio::test]
async fn location_summary_combines_percentage_rates_only() {
    let gst = rule("gst", TaxRuleKind::PercentageOfSubtotal, dec!(18));
    let mut delhi = rule("delhi-vat", TaxRuleKind::PercentageOfSubtotal, dec!(5));
    delhi.applicable_regions = vec!["Delhi".to_string()];
    let mut mumbai = rule("mh-vat", TaxRuleKind::PercentageOfSubtotal, dec!(6));
    mumbai.applicable_regions = vec!["Maharashtra".to_string()];
    let levy = rule("levy", TaxRuleKind::FixedAmount, dec!(25.00));

    let store = MemoryRuleStore::with_rules(vec![gst, delhi, mumbai, levy]);
    let engine = TaxEngine::new(Arc::new(store));

    let summary = engine.summarize_for_location("Delhi", None).await;

    // Global GST + Delhi VAT + global fixed levy; Maharashtra excluded.
    let ids: Vec<&str> = summary.rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["delhi-vat", "gst", "levy"]);

    // 18 + 5; the flat levy is not a rate.
    assert_eq!(summary.estimated_combined_rate, dec!(23));
}

#[tokio::test]
async fn location_summary_ignores_amount_thresholds() {
    let mut big_orders_only = rule("big", TaxRuleKind::PercentageOfSubtotal, dec!(2));
    big_orders_only.min_order_amount = Some(dec!(100000.00));
    let engine = TaxEngine::new(Arc::new(MemoryRuleStore::with_rules(vec![big_orders_only])));

    let summary = engine.summarize_for_location("Delhi", None).await;

    assert_eq!(summary.rules.len(), 1);
    assert_eq!(summary.estimated_combined_rate, dec!(2));
}
