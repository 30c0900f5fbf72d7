//! Rule applicability matching.
//!
//! A rule applies to a calculation input iff all of the following hold:
//!
//! 1. The rule is active.
//! 2. If `min_order_amount` is set: `subtotal ≥ min` (inclusive).
//! 3. If `max_order_amount` is set: `subtotal ≤ max` (inclusive).
//! 4. If the rule lists regions: some normalized region token is a
//!    substring of the destination state or city, or a prefix of the
//!    postal code. An empty region list means globally applicable.
//! 5. If the rule lists categories: at least one item's category contains
//!    a listed category token. An empty category list means the rule
//!    applies to the whole order, not to individual items.

use crate::calculations::common::normalize;
use crate::models::{CalculationInput, Destination, OrderItem, TaxRule};

/// Decides whether a single rule is relevant to the given input.
pub fn rule_applies(rule: &TaxRule, input: &CalculationInput) -> bool {
    if !rule.active {
        return false;
    }
    if let Some(min) = rule.min_order_amount {
        if input.subtotal < min {
            return false;
        }
    }
    if let Some(max) = rule.max_order_amount {
        if input.subtotal > max {
            return false;
        }
    }
    if rule.is_region_restricted() && !region_matches_destination(rule, &input.destination) {
        return false;
    }
    if rule.is_category_restricted() && matched_items(rule, &input.items).is_empty() {
        return false;
    }
    true
}

/// Narrows a rule snapshot to the rules relevant to one input, preserving
/// the snapshot's deterministic order.
pub fn applicable_rules<'a>(rules: &'a [TaxRule], input: &CalculationInput) -> Vec<&'a TaxRule> {
    rules.iter().filter(|r| rule_applies(r, input)).collect()
}

/// Region criterion against a full destination: substring match on state
/// and city, prefix match on the postal code.
pub fn region_matches_destination(rule: &TaxRule, destination: &Destination) -> bool {
    let state = normalize(&destination.state);
    let city = normalize(&destination.city);
    let postal = normalize(&destination.postal_code);

    rule.applicable_regions.iter().any(|region| {
        let token = normalize(region);
        state.contains(&token) || city.contains(&token) || postal.starts_with(&token)
    })
}

/// Region criterion against a bare location, for cart-less summaries.
/// Globally applicable rules (no region restriction) always match.
pub fn region_matches_location(rule: &TaxRule, state: &str, city: Option<&str>) -> bool {
    if !rule.is_region_restricted() {
        return true;
    }
    let state = normalize(state);
    let city = city.map(normalize);

    rule.applicable_regions.iter().any(|region| {
        let token = normalize(region);
        state.contains(&token) || city.as_deref().is_some_and(|c| c.contains(&token))
    })
}

/// Items whose category satisfies the rule's category restriction.
/// With no restriction, every item matches.
pub fn matched_items<'a>(rule: &TaxRule, items: &'a [OrderItem]) -> Vec<&'a OrderItem> {
    if !rule.is_category_restricted() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            let category = normalize(&item.category);
            rule.applicable_categories
                .iter()
                .any(|token| category.contains(&normalize(token)))
        })
        .collect()
}
