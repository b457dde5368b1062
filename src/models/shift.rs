//! Shift occurrence and shift assignment models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{AssignmentStatus, DocStatus};

/// One scheduled work period of a shift type, anchored on its start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftOccurrence {
    /// Name of the shift type.
    pub shift_type: String,
    /// Scheduled start.
    pub start: NaiveDateTime,
    /// Scheduled end.
    pub end: NaiveDateTime,
    /// Earliest time a check-in is attributed to this occurrence.
    pub actual_start: NaiveDateTime,
    /// Latest time a check-out is attributed to this occurrence.
    pub actual_end: NaiveDateTime,
}

impl ShiftOccurrence {
    /// Returns true if `time` falls inside the actual (widened) window.
    pub fn accepts(&self, time: NaiveDateTime) -> bool {
        time >= self.actual_start && time <= self.actual_end
    }
}

/// Assignment of an employee to a shift type from a start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// Identifier of the assignment.
    pub id: String,
    /// The assigned employee.
    pub employee_id: String,
    /// The shift type name.
    pub shift_type: String,
    /// First day the assignment applies.
    pub start_date: NaiveDate,
    /// Last day the assignment applies; open-ended when absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Whether the assignment is in force.
    #[serde(default)]
    pub status: AssignmentStatus,
    /// Lifecycle state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl ShiftAssignment {
    /// Returns true for submitted, active assignments.
    pub fn is_effective(&self) -> bool {
        self.docstatus == DocStatus::Submitted && self.status == AssignmentStatus::Active
    }

    /// Returns true if the assignment is effective on `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_effective()
            && date >= self.start_date
            && self.end_date.is_none_or(|end| date <= end)
    }
}
