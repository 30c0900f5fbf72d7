//! Per-rule tax amount computation.
//!
//! | kind                 | amount                          | basis    |
//! |----------------------|---------------------------------|----------|
//! | PercentageOfSubtotal | subtotal × rate / 100           | Subtotal |
//! | PercentageOfItems    | matched items total × rate / 100 (when category-restricted, else subtotal × rate / 100) | Items / Subtotal |
//! | FixedAmount          | rate, charged flat              | Items when category-restricted, else Subtotal |
//!
//! A category-scoped `FixedAmount` rule charges once regardless of how many
//! items match; it does not scale with the matched total the way
//! `PercentageOfItems` does.
//!
//! Every amount is rounded half-up to two decimal places here, at
//! computation time. A rule whose rounded amount is exactly zero produces
//! no line item.

use rust_decimal::Decimal;

use crate::calculations::applicability::matched_items;
use crate::calculations::common::round_half_up;
use crate::models::{CalculationInput, TaxBasis, TaxLineItem, TaxRule, TaxRuleKind};

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Computes the line item an applicable rule contributes, or `None` if the
/// rounded amount is exactly zero.
///
/// The caller is responsible for having established applicability first;
/// this function only computes.
pub fn line_item_for_rule(rule: &TaxRule, input: &CalculationInput) -> Option<TaxLineItem> {
    let matched = matched_items(rule, &input.items);
    let matched_total: Decimal = matched.iter().map(|item| item.line_total()).sum();

    let (amount, basis) = match rule.kind {
        TaxRuleKind::PercentageOfSubtotal => {
            (input.subtotal * rule.rate / PERCENT, TaxBasis::Subtotal)
        }
        TaxRuleKind::PercentageOfItems => {
            if rule.is_category_restricted() {
                (matched_total * rule.rate / PERCENT, TaxBasis::Items)
            } else {
                (input.subtotal * rule.rate / PERCENT, TaxBasis::Subtotal)
            }
        }
        TaxRuleKind::FixedAmount => {
            // Flat charge, not scaled by the number of matched items.
            let basis = if rule.is_category_restricted() {
                TaxBasis::Items
            } else {
                TaxBasis::Subtotal
            };
            (rule.rate, basis)
        }
    };

    let amount = round_half_up(amount);
    if amount == Decimal::ZERO {
        return None;
    }

    Some(TaxLineItem {
        rule_id: rule.id.clone(),
        name: rule.name.clone(),
        kind: rule.kind,
        rate: rule.rate,
        amount,
        basis,
        matched_item_ids: matched.iter().map(|item| item.id.clone()).collect(),
    })
}
