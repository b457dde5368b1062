//! Creating attendance records from classified logs.
//!
//! Creation failures that reject the document (an attendance already marked for
//! the day, a failed validation rule) do not abort processing: the logs are
//! flagged to be skipped by later runs and each gets a comment with the reason.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceResult, AttendanceStatus, CheckEvent, Comment,
};
use crate::repository::HrRepository;

/// Comment attached to an Absent record derived from logs.
pub const ABSENT_THRESHOLD_COMMENT: &str =
    "Employee was marked Absent for not meeting the working hours threshold.";

/// Comment attached to an Absent record marked for a day without logs.
pub const MISSING_CHECKINS_COMMENT: &str =
    "Employee was marked Absent due to missing Employee Checkins.";

/// What to do with the logs of one shift occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkDecision {
    /// Flag the logs as skipped without creating attendance.
    Skip,
    /// Create attendance from this result.
    Mark(AttendanceResult),
}

/// What happened to the logs of one shift occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MarkOutcome {
    /// The logs were flagged as skipped.
    Skipped,
    /// An attendance record was created and the logs linked to it.
    Marked {
        /// The created record.
        attendance: AttendanceRecord,
    },
    /// Creation was rejected; the logs were skipped and annotated.
    Compensated {
        /// Why the creation was rejected.
        reason: String,
    },
}

/// Creates the attendance for one shift occurrence and links its logs.
///
/// # Errors
///
/// Store failures propagate. Validation failures from creating the record are
/// converted into [`MarkOutcome::Compensated`].
pub fn mark_attendance_and_link_log(
    repository: &dyn HrRepository,
    logs: &[CheckEvent],
    decision: MarkDecision,
    attendance_date: NaiveDate,
    shift: &str,
) -> EngineResult<MarkOutcome> {
    let Some(first) = logs.first() else {
        return Ok(MarkOutcome::Skipped);
    };
    let employee = first.employee_id.as_str();
    let log_ids: Vec<String> = logs.iter().map(|log| log.id.clone()).collect();

    let result = match decision {
        MarkDecision::Skip => {
            repository.skip_checkins(&log_ids)?;
            info!(employee = %employee, date = %attendance_date, "Attendance skipped");
            return Ok(MarkOutcome::Skipped);
        }
        MarkDecision::Mark(result) => result,
    };

    let record = AttendanceRecord::from_result(employee, attendance_date, shift, &result);
    let attendance = match repository.insert_attendance(record) {
        Ok(attendance) => attendance,
        Err(err) if err.is_validation() => {
            return compensate(repository, &log_ids, employee, attendance_date, err);
        }
        Err(err) => return Err(err),
    };

    if attendance.status == AttendanceStatus::Absent {
        repository.add_comment(Comment::on_attendance(
            &attendance.id,
            ABSENT_THRESHOLD_COMMENT,
        ))?;
    }

    info!(
        employee = %employee,
        shift = %shift,
        status = ?attendance.status,
        in_time = ?attendance.in_time,
        out_time = ?attendance.out_time,
        working_hours = %result.total_hours,
        "Attendance marked"
    );
    debug!(
        date = %attendance_date,
        late_entry = result.late_entry,
        early_exit = result.early_exit,
        "Attendance flags"
    );

    repository.link_checkins(&log_ids, &attendance.id)?;
    Ok(MarkOutcome::Marked { attendance })
}

fn compensate(
    repository: &dyn HrRepository,
    log_ids: &[String],
    employee: &str,
    attendance_date: NaiveDate,
    err: EngineError,
) -> EngineResult<MarkOutcome> {
    let reason = err.to_string();
    warn!(
        employee = %employee,
        date = %attendance_date,
        reason = %reason,
        "Attendance creation rejected, skipping logs"
    );

    repository.skip_checkins(log_ids)?;
    for id in log_ids {
        repository.add_comment(Comment::on_checkin(
            id,
            format!("Reason for skipping auto attendance: {}", reason),
        ))?;
    }
    Ok(MarkOutcome::Compensated { reason })
}

/// Marks an employee Absent for a day without logs.
///
/// Returns `None` when attendance already exists for that day.
pub fn mark_absent(
    repository: &dyn HrRepository,
    employee_id: &str,
    attendance_date: NaiveDate,
    shift: &str,
) -> EngineResult<Option<AttendanceRecord>> {
    let record = AttendanceRecord::absent(employee_id, attendance_date, shift);
    let attendance = match repository.insert_attendance(record) {
        Ok(attendance) => attendance,
        Err(EngineError::DuplicateAttendance { .. }) => {
            debug!(employee = %employee_id, date = %attendance_date, "Attendance already marked");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    repository.add_comment(Comment::on_attendance(
        &attendance.id,
        MISSING_CHECKINS_COMMENT,
    ))?;
    info!(employee = %employee_id, date = %attendance_date, shift = %shift, "Marked absent");
    Ok(Some(attendance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogDirection;
    use crate::repository::{HrStore, InMemoryRepository};
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_event(id: &str, time: &str, direction: LogDirection) -> CheckEvent {
        CheckEvent {
            id: id.to_string(),
            employee_id: "EMP-0001".to_string(),
            timestamp: make_datetime("2024-03-04", time),
            direction: Some(direction),
            shift_type: "General".to_string(),
            shift_start: make_datetime("2024-03-04", "09:00:00"),
            shift_end: make_datetime("2024-03-04", "18:00:00"),
            shift_actual_end: make_datetime("2024-03-04", "20:00:00"),
        }
    }

    fn seeded_repository(events: &[CheckEvent]) -> InMemoryRepository {
        let checkins = events
            .iter()
            .map(|e| crate::models::EmployeeCheckin {
                id: e.id.clone(),
                employee_id: e.employee_id.clone(),
                time: e.timestamp,
                direction: e.direction,
                device_id: None,
                skip_auto_attendance: false,
                attendance: None,
                shift: None,
            })
            .collect();
        InMemoryRepository::new(HrStore {
            checkins,
            ..Default::default()
        })
    }

    fn make_result(status: AttendanceStatus, hours: i64) -> AttendanceResult {
        AttendanceResult {
            status,
            total_hours: Decimal::new(hours, 0),
            late_entry: false,
            early_exit: false,
            in_time: Some(make_datetime("2024-03-04", "09:00:00")),
            out_time: Some(make_datetime("2024-03-04", "18:00:00")),
        }
    }

    #[test]
    fn test_mark_links_logs() {
        let events = vec![
            make_event("CHK-1", "09:00:00", LogDirection::In),
            make_event("CHK-2", "18:00:00", LogDirection::Out),
        ];
        let repository = seeded_repository(&events);

        let outcome = mark_attendance_and_link_log(
            &repository,
            &events,
            MarkDecision::Mark(make_result(AttendanceStatus::Present, 9)),
            make_date("2024-03-04"),
            "General",
        )
        .unwrap();

        let MarkOutcome::Marked { attendance } = outcome else {
            panic!("Expected Marked outcome");
        };
        assert_eq!(attendance.status, AttendanceStatus::Present);
        assert_eq!(attendance.working_hours, Some(Decimal::new(9, 0)));

        let store = repository.snapshot().unwrap();
        assert!(
            store
                .checkins
                .iter()
                .all(|c| c.attendance.as_deref() == Some(attendance.id.as_str()))
        );
        assert!(store.comments.is_empty());
    }

    #[test]
    fn test_absent_gets_threshold_comment() {
        let events = vec![make_event("CHK-1", "09:00:00", LogDirection::In)];
        let repository = seeded_repository(&events);

        let outcome = mark_attendance_and_link_log(
            &repository,
            &events,
            MarkDecision::Mark(make_result(AttendanceStatus::Absent, 2)),
            make_date("2024-03-04"),
            "General",
        )
        .unwrap();

        let MarkOutcome::Marked { attendance } = outcome else {
            panic!("Expected Marked outcome");
        };
        let comments = repository.list_comments(&attendance.id).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, ABSENT_THRESHOLD_COMMENT);
    }

    #[test]
    fn test_skip_decision_flags_logs() {
        let events = vec![make_event("CHK-1", "09:00:00", LogDirection::In)];
        let repository = seeded_repository(&events);

        let outcome = mark_attendance_and_link_log(
            &repository,
            &events,
            MarkDecision::Skip,
            make_date("2024-03-04"),
            "General",
        )
        .unwrap();

        assert_eq!(outcome, MarkOutcome::Skipped);
        let store = repository.snapshot().unwrap();
        assert!(store.checkins[0].skip_auto_attendance);
        assert!(store.attendance.is_empty());
    }

    #[test]
    fn test_duplicate_is_compensated() {
        let events = vec![
            make_event("CHK-1", "09:00:00", LogDirection::In),
            make_event("CHK-2", "18:00:00", LogDirection::Out),
        ];
        let repository = seeded_repository(&events);
        repository
            .insert_attendance(AttendanceRecord::absent(
                "EMP-0001",
                make_date("2024-03-04"),
                "General",
            ))
            .unwrap();

        let outcome = mark_attendance_and_link_log(
            &repository,
            &events,
            MarkDecision::Mark(make_result(AttendanceStatus::Present, 9)),
            make_date("2024-03-04"),
            "General",
        )
        .unwrap();

        let MarkOutcome::Compensated { reason } = outcome else {
            panic!("Expected Compensated outcome");
        };
        assert!(reason.contains("already marked"));

        let store = repository.snapshot().unwrap();
        assert!(store.checkins.iter().all(|c| c.skip_auto_attendance));
        assert!(store.checkins.iter().all(|c| c.attendance.is_none()));
        let comments = repository.list_comments("CHK-2").unwrap();
        assert!(comments[0]
            .content
            .starts_with("Reason for skipping auto attendance: "));
    }

    #[test]
    fn test_empty_logs_do_nothing() {
        let repository = InMemoryRepository::default();
        let outcome = mark_attendance_and_link_log(
            &repository,
            &[],
            MarkDecision::Mark(make_result(AttendanceStatus::Present, 9)),
            make_date("2024-03-04"),
            "General",
        )
        .unwrap();
        assert_eq!(outcome, MarkOutcome::Skipped);
        assert!(repository.snapshot().unwrap().attendance.is_empty());
    }

    #[test]
    fn test_mark_absent_adds_comment_once() {
        let repository = InMemoryRepository::default();
        let date = make_date("2024-03-05");

        let first = mark_absent(&repository, "EMP-0001", date, "General").unwrap();
        let second = mark_absent(&repository, "EMP-0001", date, "General").unwrap();

        let attendance = first.unwrap();
        assert!(second.is_none());
        assert_eq!(attendance.status, AttendanceStatus::Absent);
        let comments = repository.list_comments(&attendance.id).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, MISSING_CHECKINS_COMMENT);
    }
}
