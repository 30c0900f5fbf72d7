//! Shared helpers for tax amount computation.

use rust_decimal::Decimal;

/// Rounds a monetary value to exactly two decimal places using half-up
/// rounding (values at exactly 0.005 round away from zero).
///
/// Every per-rule amount is rounded through this function at computation
/// time; the final total is the rounded sum of already-rounded line items,
/// never a deferred rounding of raw products.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_engine::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(32.444)), dec!(32.44));
/// assert_eq!(round_half_up(dec!(32.445)), dec!(32.45));
/// assert_eq!(round_half_up(dec!(32.446)), dec!(32.45));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Normalizes a matching token or field: trimmed and lower-cased.
///
/// Region and category matching is deliberately normalize-then-contains,
/// not equality — a single token has to match several postal-code prefixes
/// or city name variants.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
