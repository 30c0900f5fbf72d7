use serde::{Deserialize, Serialize};

/// Outcome of pre-submit validation.
///
/// Errors are blocking in intent: `valid == false` signals the caller
/// *should* stop the checkout. Warnings are advisory and never block.
/// The report is advice only — nothing here prevents a subsequent
/// `calculate()` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
