//! Attendance models.
//!
//! This module contains the [`WorkingHours`] output of log pairing, the
//! [`AttendanceResult`] produced by classification, and the persisted
//! [`AttendanceRecord`].

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DocStatus;
use crate::calculation::time_diff_in_hours;

/// Attendance status of an employee for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Worked at least the half-day threshold.
    Present,
    /// Worked less than the half-day threshold.
    #[serde(rename = "Half Day")]
    HalfDay,
    /// Worked less than the absent threshold, or did not check in at all.
    Absent,
    /// On approved leave.
    #[serde(rename = "On Leave")]
    OnLeave,
}

/// A closed IN/OUT span.
///
/// The end is not guaranteed to be after the start; a reversed interval yields
/// negative hours rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkInterval {
    /// Start of the span.
    pub start_time: NaiveDateTime,
    /// End of the span.
    pub end_time: NaiveDateTime,
}

impl WorkInterval {
    /// Duration in hours, rounded to 2 decimal places.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::WorkInterval;
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
    /// let interval = WorkInterval {
    ///     start_time: at("2024-03-04 09:00:00"),
    ///     end_time: at("2024-03-04 12:20:00"),
    /// };
    /// assert_eq!(interval.hours(), Decimal::new(333, 2)); // 3.33
    /// ```
    pub fn hours(&self) -> Decimal {
        time_diff_in_hours(self.start_time, self.end_time)
    }
}

/// Total working hours derived from one shift occurrence's logs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkingHours {
    /// Sum of the counted intervals.
    pub total_hours: Decimal,
    /// Time taken as the check-in, if any.
    pub in_time: Option<NaiveDateTime>,
    /// Time taken as the check-out, if any.
    pub out_time: Option<NaiveDateTime>,
}

/// Classified attendance for one employee and shift occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceResult {
    /// The derived status.
    pub status: AttendanceStatus,
    /// Total working hours.
    pub total_hours: Decimal,
    /// Checked in after the grace period.
    pub late_entry: bool,
    /// Checked out before the grace period.
    pub early_exit: bool,
    /// Check-in time.
    pub in_time: Option<NaiveDateTime>,
    /// Check-out time.
    pub out_time: Option<NaiveDateTime>,
}

/// A stored attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Identifier; assigned by the repository on insert.
    #[serde(default)]
    pub id: String,
    /// The employee.
    pub employee_id: String,
    /// The day the attendance is for.
    pub attendance_date: NaiveDate,
    /// The status.
    pub status: AttendanceStatus,
    /// Working hours, when derived from logs.
    #[serde(default)]
    pub working_hours: Option<Decimal>,
    /// Shift type the attendance was marked for.
    #[serde(default)]
    pub shift: Option<String>,
    /// Late entry flag.
    #[serde(default)]
    pub late_entry: bool,
    /// Early exit flag.
    #[serde(default)]
    pub early_exit: bool,
    /// Check-in time.
    #[serde(default)]
    pub in_time: Option<NaiveDateTime>,
    /// Check-out time.
    #[serde(default)]
    pub out_time: Option<NaiveDateTime>,
    /// Lifecycle state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl AttendanceRecord {
    /// Builds a submitted record from a classification result.
    pub fn from_result(
        employee_id: &str,
        attendance_date: NaiveDate,
        shift: &str,
        result: &AttendanceResult,
    ) -> Self {
        Self {
            id: String::new(),
            employee_id: employee_id.to_string(),
            attendance_date,
            status: result.status,
            working_hours: Some(result.total_hours),
            shift: Some(shift.to_string()),
            late_entry: result.late_entry,
            early_exit: result.early_exit,
            in_time: result.in_time,
            out_time: result.out_time,
            docstatus: DocStatus::Submitted,
        }
    }

    /// Builds a submitted Absent record with no working hours.
    pub fn absent(employee_id: &str, attendance_date: NaiveDate, shift: &str) -> Self {
        Self {
            id: String::new(),
            employee_id: employee_id.to_string(),
            attendance_date,
            status: AttendanceStatus::Absent,
            working_hours: None,
            shift: Some(shift.to_string()),
            late_entry: false,
            early_exit: false,
            in_time: None,
            out_time: None,
            docstatus: DocStatus::Submitted,
        }
    }
}
