//! Storage abstraction for HR documents.
//!
//! Workflows and the auto attendance processor never talk to a database directly;
//! they go through [`HrRepository`], which the embedding application implements on
//! top of its document store. [`InMemoryRepository`] is a complete implementation
//! backed by plain collections, used by the HTTP layer and the tests.

mod memory;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::EngineResult;
use crate::models::{
    AccessAssignment, AttendanceRecord, Comment, Employee, EmployeeCheckin, FuelAllowanceRecord,
    FuelPrice, HolidayList, LeaveApplication, LogDirection, Project, ProjectAssignment,
    ShiftAssignment, WorkFromHome,
};

pub use memory::{HrStore, InMemoryRepository};

/// Criteria for fetching check-in logs. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckinFilter {
    /// Logs of this employee only.
    pub employee_id: Option<String>,
    /// Logs attributed to this shift type only.
    pub shift_type: Option<String>,
    /// Logs not skipped and not yet linked to an attendance record.
    pub unprocessed_only: bool,
    /// Logs at or after this time.
    pub time_from: Option<NaiveDateTime>,
    /// Logs whose shift occurrence's actual end is strictly before this time.
    pub shift_actual_end_before: Option<NaiveDateTime>,
    /// Logs on this calendar date.
    pub on_date: Option<NaiveDate>,
    /// Logs with this direction.
    pub direction: Option<LogDirection>,
}

impl CheckinFilter {
    /// Returns true if `checkin` satisfies every set criterion.
    pub fn matches(&self, checkin: &EmployeeCheckin) -> bool {
        let shift = checkin.shift.as_ref();

        self.employee_id
            .as_deref()
            .is_none_or(|id| checkin.employee_id == id)
            && self
                .shift_type
                .as_deref()
                .is_none_or(|name| shift.is_some_and(|s| s.shift_type == name))
            && (!self.unprocessed_only
                || (!checkin.skip_auto_attendance && checkin.attendance.is_none()))
            && self.time_from.is_none_or(|from| checkin.time >= from)
            && self
                .shift_actual_end_before
                .is_none_or(|before| shift.is_some_and(|s| s.actual_end < before))
            && self.on_date.is_none_or(|date| checkin.time.date() == date)
            && self
                .direction
                .is_none_or(|direction| checkin.direction == Some(direction))
    }
}

/// Document store operations the engine depends on.
///
/// Lookups return `Ok(None)` or an empty list when nothing matches; an `Err` always
/// means the store itself failed, except where a method documents otherwise.
pub trait HrRepository: Send + Sync {
    /// Fetches an employee, failing with `EmployeeNotFound` when missing.
    fn get_employee(&self, id: &str) -> EngineResult<Employee>;

    /// Finds the employee registered with a biometric device id.
    fn find_employee_by_device_id(&self, device_id: &str) -> EngineResult<Option<Employee>>;

    /// All employees, ordered by id.
    fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Replaces a stored employee.
    fn update_employee(&self, employee: &Employee) -> EngineResult<()>;

    /// All shift assignments, in insertion order.
    fn list_shift_assignments(&self) -> EngineResult<Vec<ShiftAssignment>>;

    /// Check-in logs matching `filter`, ordered by employee and then time.
    fn list_checkins(&self, filter: &CheckinFilter) -> EngineResult<Vec<EmployeeCheckin>>;

    /// Stores a new log and returns it with its assigned id.
    fn insert_checkin(&self, checkin: EmployeeCheckin) -> EngineResult<EmployeeCheckin>;

    /// Sets the skip flag on the given logs.
    fn skip_checkins(&self, checkin_ids: &[String]) -> EngineResult<()>;

    /// Links the given logs to an attendance record.
    fn link_checkins(&self, checkin_ids: &[String], attendance_id: &str) -> EngineResult<()>;

    /// Stores a new attendance record and returns it with its assigned id.
    ///
    /// Fails with `DuplicateAttendance` when a non-cancelled record already exists
    /// for the employee on that date.
    fn insert_attendance(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord>;

    /// Attendance records of an employee dated within `[start, end]`.
    fn list_attendance(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Attaches a comment to a document.
    fn add_comment(&self, comment: Comment) -> EngineResult<()>;

    /// Comments attached to a document.
    fn list_comments(&self, reference_name: &str) -> EngineResult<Vec<Comment>>;

    /// Fetches a holiday list by name.
    fn get_holiday_list(&self, name: &str) -> EngineResult<Option<HolidayList>>;

    /// Leave applications of an employee.
    fn list_leave_applications(&self, employee_id: &str) -> EngineResult<Vec<LeaveApplication>>;

    /// Work from home requests of an employee.
    fn list_work_from_home(&self, employee_id: &str) -> EngineResult<Vec<WorkFromHome>>;

    /// Fetches a project by name.
    fn get_project(&self, name: &str) -> EngineResult<Option<Project>>;

    /// Project assignments of an employee.
    fn list_project_assignments(&self, employee_id: &str)
    -> EngineResult<Vec<ProjectAssignment>>;

    /// Fuel prices dated within `[start, end]`.
    fn list_fuel_prices(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<FuelPrice>>;

    /// Stores a monthly fuel allowance.
    fn insert_fuel_allowance(&self, record: FuelAllowanceRecord) -> EngineResult<()>;

    /// All tool access assignments.
    fn list_access_assignments(&self) -> EngineResult<Vec<AccessAssignment>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftOccurrence;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_checkin() -> EmployeeCheckin {
        EmployeeCheckin {
            id: "CHK-00001".to_string(),
            employee_id: "EMP-0001".to_string(),
            time: make_datetime("2024-03-04", "09:05:00"),
            direction: Some(LogDirection::In),
            device_id: None,
            skip_auto_attendance: false,
            attendance: None,
            shift: Some(ShiftOccurrence {
                shift_type: "General".to_string(),
                start: make_datetime("2024-03-04", "09:00:00"),
                end: make_datetime("2024-03-04", "18:00:00"),
                actual_start: make_datetime("2024-03-04", "08:00:00"),
                actual_end: make_datetime("2024-03-04", "20:00:00"),
            }),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(CheckinFilter::default().matches(&make_checkin()));
    }

    #[test]
    fn test_filter_on_shift_and_sync_time() {
        let filter = CheckinFilter {
            shift_type: Some("General".to_string()),
            shift_actual_end_before: Some(make_datetime("2024-03-05", "00:00:00")),
            ..Default::default()
        };
        assert!(filter.matches(&make_checkin()));

        let filter = CheckinFilter {
            shift_actual_end_before: Some(make_datetime("2024-03-04", "20:00:00")),
            ..Default::default()
        };
        assert!(!filter.matches(&make_checkin()));
    }

    #[test]
    fn test_unprocessed_filter_excludes_linked_and_skipped() {
        let filter = CheckinFilter {
            unprocessed_only: true,
            ..Default::default()
        };

        let mut linked = make_checkin();
        linked.attendance = Some("ATT-00001".to_string());
        assert!(!filter.matches(&linked));

        let mut skipped = make_checkin();
        skipped.skip_auto_attendance = true;
        assert!(!filter.matches(&skipped));
    }

    #[test]
    fn test_shift_filter_excludes_logs_without_shift() {
        let mut checkin = make_checkin();
        checkin.shift = None;
        let filter = CheckinFilter {
            shift_type: Some("General".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&checkin));
    }

    #[test]
    fn test_repository_is_object_safe() {
        fn accepts(_: &dyn HrRepository) {}
        accepts(&InMemoryRepository::default());
    }
}
