use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax_rule::{TaxRule, TaxRuleKind};

/// The monetary amount a rule's rate was applied against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxBasis {
    /// The whole order subtotal.
    Subtotal,
    /// The total of only the items matched by a category restriction.
    Items,
}

/// One applied rule's contribution to the tax breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLineItem {
    pub rule_id: String,
    pub name: String,
    pub kind: TaxRuleKind,
    pub rate: Decimal,
    /// Rounded to two decimal places at computation time.
    pub amount: Decimal,
    pub basis: TaxBasis,
    pub matched_item_ids: Vec<String>,
}

impl TaxLineItem {
    /// Short human-readable description, e.g. `"GST (18%)"` or
    /// `"Eco levy (flat 25)"`.
    pub fn summary(&self) -> String {
        if self.kind.is_percentage() {
            format!("{} ({}%)", self.name, self.rate)
        } else {
            format!("{} (flat {})", self.name, self.rate)
        }
    }
}

/// Full tax breakdown for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub subtotal: Decimal,
    /// `round_half_up(Σ line item amounts)`.
    pub total_tax: Decimal,
    /// `subtotal + total_tax + shipping_fee`. Shipping is never taxed.
    pub grand_total: Decimal,
    /// Non-zero line items, in rule-evaluation order.
    pub line_items: Vec<TaxLineItem>,
    pub applied_rule_summaries: Vec<String>,
}

/// Rules in force at a destination, independent of any particular cart.
///
/// Amount thresholds are ignored (unknowable without a cart) and
/// fixed-amount rules are excluded from `estimated_combined_rate`, since a
/// flat charge cannot be expressed as a rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTaxSummary {
    pub state: String,
    pub city: Option<String>,
    pub rules: Vec<TaxRule>,
    pub estimated_combined_rate: Decimal,
}
