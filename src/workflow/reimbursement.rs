//! Reimbursement claims against the medical allowance.
//!
//! Only Medical claims touch the employee's balance: submitting draws the claim
//! from the balance, cancelling puts it back. The balance is always recomputed
//! as `medical_allowance - medical_availed`.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Notification, Reimbursement};
use crate::repository::HrRepository;

/// Draws `amount` from the employee's medical balance.
pub fn apply_medical_claim(employee: &mut Employee, amount: Decimal) -> EngineResult<()> {
    if amount > employee.medical_balance {
        return Err(EngineError::InsufficientBalance {
            employee: employee.id.clone(),
            requested: amount,
            available: employee.medical_balance,
        });
    }
    employee.medical_availed += amount;
    employee.medical_balance = employee.medical_allowance - employee.medical_availed;
    Ok(())
}

/// Returns `amount` to the employee's medical balance.
pub fn revert_medical_claim(employee: &mut Employee, amount: Decimal) {
    employee.medical_availed -= amount;
    employee.medical_balance = employee.medical_allowance - employee.medical_availed;
}

/// Submits a claim, updating the employee's medical balance for Medical claims.
///
/// # Errors
///
/// `InsufficientBalance` when a Medical claim exceeds the remaining balance.
pub fn on_submit(repository: &dyn HrRepository, claim: &Reimbursement) -> EngineResult<()> {
    if !claim.is_medical() {
        return Ok(());
    }
    let mut employee = repository.get_employee(&claim.employee_id)?;
    apply_medical_claim(&mut employee, claim.total_amount)?;
    repository.update_employee(&employee)?;
    info!(
        employee = %employee.id,
        claim = %claim.id,
        amount = %claim.total_amount,
        balance = %employee.medical_balance,
        "Medical claim submitted"
    );
    Ok(())
}

/// Cancels a claim, returning a Medical claim's amount to the balance.
pub fn on_cancel(
    repository: &dyn HrRepository,
    claim: &Reimbursement,
) -> EngineResult<Option<Notification>> {
    if !claim.is_medical() {
        return Ok(None);
    }
    let mut employee = repository.get_employee(&claim.employee_id)?;
    revert_medical_claim(&mut employee, claim.total_amount);
    repository.update_employee(&employee)?;
    info!(employee = %employee.id, claim = %claim.id, "Medical claim cancelled");

    Ok(Some(Notification::Message {
        message: format!(
            "Balance of {} added back to the employee medical balance",
            claim.total_amount
        ),
    }))
}

/// Starts a new allowance period: nothing availed, full allowance available.
///
/// Returns the number of employees reset.
pub fn reset_medical_allowances(repository: &dyn HrRepository) -> EngineResult<usize> {
    let employees = repository.list_employees()?;
    for mut employee in employees.iter().cloned() {
        employee.medical_availed = Decimal::ZERO;
        employee.medical_balance = employee.medical_allowance;
        repository.update_employee(&employee)?;
    }
    info!(employees = employees.len(), "Medical allowances reset");
    Ok(employees.len())
}
