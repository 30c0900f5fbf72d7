mod order;
mod result;
mod tax_rule;
mod validation;

pub use order::{CalculationInput, Destination, OrderItem};
pub use result::{CalculationResult, LocationTaxSummary, TaxBasis, TaxLineItem};
pub use tax_rule::{TaxRule, TaxRuleKind};
pub use validation::ValidationReport;
