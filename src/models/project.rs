//! Project assignment and fuel allowance models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AssignmentStatus, DocStatus};

/// A project employees can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project name.
    pub name: String,
    /// Planned start.
    #[serde(default)]
    pub expected_start_date: Option<NaiveDate>,
    /// Planned end.
    #[serde(default)]
    pub expected_end_date: Option<NaiveDate>,
}

/// Allocation of an employee's time to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAssignment {
    /// Identifier.
    #[serde(default)]
    pub id: String,
    /// The assigned employee.
    pub employee_id: String,
    /// Project name.
    pub project: String,
    /// First day of the assignment.
    pub start_date: NaiveDate,
    /// Last day of the assignment.
    pub end_date: NaiveDate,
    /// Whether the assignment is in force.
    #[serde(default)]
    pub status: AssignmentStatus,
    /// Hours per day allocated to the project.
    pub allocated_hours_daily: Decimal,
    /// Hours per month allocated to the project.
    #[serde(default)]
    pub allocated_hours_monthly: Decimal,
    /// Lifecycle state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl ProjectAssignment {
    /// Returns true if this assignment's dates overlap `other`'s.
    pub fn overlaps(&self, other: &ProjectAssignment) -> bool {
        other.start_date <= self.end_date && other.end_date >= self.start_date
    }

    /// Returns true for submitted, active assignments.
    pub fn is_effective(&self) -> bool {
        self.status == AssignmentStatus::Active && self.docstatus == DocStatus::Submitted
    }
}

/// A fuel price record for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelPrice {
    /// The date of the price.
    pub date: NaiveDate,
    /// Pump price per litre.
    pub fuel_amount: Decimal,
    /// Price per litre already covered by salary.
    pub base_fuel_amount: Decimal,
}

/// A monthly fuel allowance granted to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelAllowanceRecord {
    /// The employee.
    pub employee_id: String,
    /// Allowance amount after clamping.
    pub allowance_amount: Decimal,
    /// Last day of the month the allowance is for.
    pub fuel_allowance_month: NaiveDate,
}
