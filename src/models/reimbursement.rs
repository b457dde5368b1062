//! Reimbursement claim model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DocStatus;

/// Category of a reimbursement claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReimbursementType {
    /// Drawn from the employee's medical allowance.
    Medical,
    /// Travel expenses.
    Travel,
    /// Anything else.
    Other,
}

/// A reimbursement claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reimbursement {
    /// Identifier.
    pub id: String,
    /// The claiming employee.
    pub employee_id: String,
    /// Category.
    pub reimbursement_type: ReimbursementType,
    /// Claimed amount.
    pub total_amount: Decimal,
    /// Lifecycle state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl Reimbursement {
    /// Returns true if the claim draws on the medical allowance.
    pub fn is_medical(&self) -> bool {
        self.reimbursement_type == ReimbursementType::Medical
    }
}
