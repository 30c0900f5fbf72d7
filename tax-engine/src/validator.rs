//! Advisory validation of calculation inputs and resolved rule sets.
//!
//! Errors mark the input as invalid and signal the caller to block the
//! checkout; warnings never block. Nothing here prevents a subsequent
//! `calculate()` call — the engine stays fail-open regardless of what this
//! module reports.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::models::{CalculationInput, TaxRule, TaxRuleKind, ValidationReport};

/// The combined percentage rate above which a rule configuration is
/// considered suspicious.
const COMBINED_RATE_WARNING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Checks a calculation input for blocking errors and advisory warnings.
pub fn validate_input(input: &CalculationInput) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if input.subtotal < Decimal::ZERO {
        errors.push("subtotal must not be negative".to_string());
    }
    if input.shipping_fee < Decimal::ZERO {
        errors.push("shipping fee must not be negative".to_string());
    }
    if input.items.is_empty() {
        errors.push("order has no items".to_string());
    }
    for item in &input.items {
        if item.unit_price < Decimal::ZERO {
            errors.push(format!("item '{}' has a negative unit price", item.id));
        }
        if item.quantity == 0 {
            errors.push(format!("item '{}' has zero quantity", item.id));
        }
    }
    if input.destination.state.trim().is_empty() {
        errors.push("destination state is missing".to_string());
    }
    if input.destination.postal_code.trim().is_empty() {
        warnings.push("destination postal code is missing".to_string());
    }

    ValidationReport::new(errors, warnings)
}

/// Checks the rules resolved as applicable to one input for suspicious
/// combinations. Advisory only.
pub fn rule_set_warnings(applicable: &[&TaxRule]) -> Vec<String> {
    let mut warnings = Vec::new();

    let broad_subtotal_rules = applicable
        .iter()
        .filter(|r| r.kind == TaxRuleKind::PercentageOfSubtotal && r.is_unrestricted())
        .count();
    if broad_subtotal_rules > 1 {
        warnings.push(format!(
            "{broad_subtotal_rules} unrestricted percentage-of-subtotal rules apply simultaneously"
        ));
    }

    for kind in [
        TaxRuleKind::PercentageOfSubtotal,
        TaxRuleKind::PercentageOfItems,
        TaxRuleKind::FixedAmount,
    ] {
        let region_restricted = applicable
            .iter()
            .filter(|r| r.kind == kind && r.is_region_restricted())
            .count();
        if region_restricted > 1 {
            warnings.push(format!(
                "{region_restricted} region-restricted {} rules apply simultaneously",
                kind.as_str()
            ));
        }
    }

    // Fixed amounts are currency, not rates, and are excluded from the sum.
    let combined_rate: Decimal = applicable
        .iter()
        .filter(|r| r.kind.is_percentage())
        .map(|r| r.rate)
        .sum();
    if combined_rate > COMBINED_RATE_WARNING_THRESHOLD {
        warnings.push(format!(
            "combined applicable rate {}% exceeds {}%",
            round_half_up(combined_rate),
            COMBINED_RATE_WARNING_THRESHOLD
        ));
    }

    warnings
}
