use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a rule's `rate` field is interpreted when computing the tax amount.
///
/// The variant order is load-bearing: cached rule sets are sorted by
/// `(kind, rate)` ascending, so `Ord` on this enum fixes the tie-break
/// order between rules with identical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaxRuleKind {
    /// `rate` is a percentage (0–100) applied to the order subtotal.
    PercentageOfSubtotal,
    /// `rate` is a percentage (0–100) applied to the total of the
    /// items matched by the rule's category restriction.
    PercentageOfItems,
    /// `rate` is an absolute currency amount, charged flat.
    FixedAmount,
}

impl TaxRuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PercentageOfSubtotal => "percentage_of_subtotal",
            Self::PercentageOfItems => "percentage_of_items",
            Self::FixedAmount => "fixed_amount",
        }
    }

    /// True for the kinds whose `rate` is a percentage rather than a
    /// currency amount.
    pub fn is_percentage(&self) -> bool {
        matches!(self, Self::PercentageOfSubtotal | Self::PercentageOfItems)
    }
}

/// A persisted business rule specifying when and how much tax to apply.
///
/// Rules are owned by the external rule store; this engine treats them as
/// read-only records. Empty `applicable_regions` means the rule has no
/// region restriction; empty `applicable_categories` means it applies to
/// the whole order rather than to individual items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    pub id: String,
    pub name: String,
    pub kind: TaxRuleKind,

    /// Percentage (0–100) for percentage kinds; currency amount for
    /// [`TaxRuleKind::FixedAmount`].
    pub rate: Decimal,

    /// Inclusive lower bound on the order subtotal, if any.
    pub min_order_amount: Option<Decimal>,
    /// Inclusive upper bound on the order subtotal, if any.
    pub max_order_amount: Option<Decimal>,

    /// Region tokens matched against the destination (substring on state
    /// and city, prefix on postal code). Empty = globally applicable.
    pub applicable_regions: Vec<String>,
    /// Category tokens matched against item categories (substring).
    /// Empty = applies to the whole order.
    pub applicable_categories: Vec<String>,

    pub active: bool,
}

impl TaxRule {
    pub fn is_region_restricted(&self) -> bool {
        !self.applicable_regions.is_empty()
    }

    pub fn is_category_restricted(&self) -> bool {
        !self.applicable_categories.is_empty()
    }

    /// A rule with neither a region nor a category restriction.
    pub fn is_unrestricted(&self) -> bool {
        !self.is_region_restricted() && !self.is_category_restricted()
    }
}
