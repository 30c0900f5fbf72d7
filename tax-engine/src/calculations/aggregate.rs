//! Combines per-rule line items into a full tax breakdown.

use rust_decimal::Decimal;

use crate::calculations::amount::line_item_for_rule;
use crate::calculations::applicability::rule_applies;
use crate::calculations::common::round_half_up;
use crate::models::{CalculationInput, CalculationResult, TaxRule};

/// Walks the rule snapshot in its deterministic order, collects the
/// non-zero line items for the applicable rules, and totals them.
///
/// `total_tax` is the rounded sum of already-rounded line item amounts;
/// `grand_total = subtotal + total_tax + shipping_fee`. The shipping fee
/// itself is never taxed.
pub fn aggregate(rules: &[TaxRule], input: &CalculationInput) -> CalculationResult {
    let line_items: Vec<_> = rules
        .iter()
        .filter(|rule| rule_applies(rule, input))
        .filter_map(|rule| line_item_for_rule(rule, input))
        .collect();

    let total_tax = round_half_up(line_items.iter().map(|line| line.amount).sum::<Decimal>());
    let applied_rule_summaries = line_items.iter().map(|line| line.summary()).collect();

    CalculationResult {
        subtotal: input.subtotal,
        total_tax,
        grand_total: input.subtotal + total_tax + input.shipping_fee,
        line_items,
        applied_rule_summaries,
    }
}
