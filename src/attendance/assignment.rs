//! Resolution of which shift type applies to an employee.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{Employee, EmployeeStatus, ShiftAssignment};

/// Name of the shift type an employee works on `date`.
///
/// An effective shift assignment covering the date wins, the most recently started
/// one when several overlap. Otherwise the employee's default shift applies.
pub fn resolve_shift_name(
    employee: &Employee,
    assignments: &[ShiftAssignment],
    date: NaiveDate,
) -> Option<String> {
    assignments
        .iter()
        .filter(|a| a.employee_id == employee.id && a.covers(date))
        .max_by_key(|a| a.start_date)
        .map(|a| a.shift_type.clone())
        .or_else(|| employee.default_shift.clone())
}

/// Employees attendance is marked for under `shift_type`, ordered by id.
///
/// These are the employees with an effective assignment to the shift starting on or
/// after `from_date`, plus active employees whose default shift it is and who have
/// no other effective assignment starting on or after `from_date`. Inactive
/// employees are excluded.
pub fn assigned_employees(
    shift_type: &str,
    from_date: Option<NaiveDate>,
    employees: &[Employee],
    assignments: &[ShiftAssignment],
) -> Vec<String> {
    let in_range: Vec<&ShiftAssignment> = assignments
        .iter()
        .filter(|a| a.is_effective())
        .filter(|a| from_date.is_none_or(|from| a.start_date >= from))
        .collect();

    let mut assigned: BTreeSet<String> = in_range
        .iter()
        .filter(|a| a.shift_type == shift_type)
        .map(|a| a.employee_id.clone())
        .collect();

    let has_other_assignment =
        |employee_id: &str| in_range.iter().any(|a| a.employee_id == employee_id);

    assigned.extend(
        employees
            .iter()
            .filter(|e| e.is_active())
            .filter(|e| e.default_shift.as_deref() == Some(shift_type))
            .filter(|e| !has_other_assignment(&e.id))
            .map(|e| e.id.clone()),
    );

    let inactive: BTreeSet<&str> = employees
        .iter()
        .filter(|e| e.status == EmployeeStatus::Inactive)
        .map(|e| e.id.as_str())
        .collect();

    assigned
        .into_iter()
        .filter(|id| !inactive.contains(id.as_str()))
        .collect()
}
