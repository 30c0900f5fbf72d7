//! Tax calculation pipeline: applicability filtering, per-rule amount
//! computation, and aggregation into a full breakdown.

pub mod aggregate;
pub mod amount;
pub mod applicability;
pub mod common;

pub use aggregate::aggregate;
pub use amount::line_item_for_rule;
pub use applicability::{applicable_rules, rule_applies};
