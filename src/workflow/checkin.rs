//! Check-in log validation and device ingestion.
//!
//! Every new log passes [`validate_checkin`] before it is stored. Validation also
//! attributes the log to a shift occurrence, which is what later lets auto
//! attendance pick it up.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::attendance::resolve_shift_name;
use crate::calculation::{candidate_dates, occurrence_on};
use crate::config::{ConfigLoader, PairingMode};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeCheckin, LogDirection, ShiftOccurrence};
use crate::repository::{CheckinFilter, HrRepository};

fn rejected(employee: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidCheckin {
        employee: employee.to_string(),
        message: message.into(),
    }
}

fn check_word(direction: Option<LogDirection>) -> &'static str {
    match direction {
        Some(LogDirection::In) => "Check-in",
        Some(LogDirection::Out) => "Check-out",
        None => "Check-in/out",
    }
}

/// Validates a new log against the clock and the employee's existing logs.
///
/// Returns the log with its shift occurrence filled in, or `None` as the shift
/// when no shift of the employee covers the time. Rules, in order:
///
/// 1. the employee is active
/// 2. the log is not dated before today
/// 3. the log is not in the future
/// 4. no log with the same time and direction exists
/// 5. a strict-direction shift requires a direction unless the log skips auto attendance
/// 6. no approved full-day leave covers the date
/// 7. an OUT needs an IN on the same day
/// 8. no two consecutive logs of the same direction today
/// 9. the log is not earlier than the employee's last log
///
/// # Errors
///
/// `InvalidCheckin` for a broken rule, `EmployeeNotFound` for an unknown employee,
/// `ShiftTypeNotFound` when an assignment names an unconfigured shift type.
pub fn validate_checkin(
    repository: &dyn HrRepository,
    config: &ConfigLoader,
    mut checkin: EmployeeCheckin,
    now: NaiveDateTime,
) -> EngineResult<EmployeeCheckin> {
    let employee = repository.get_employee(&checkin.employee_id)?;
    let id = employee.id.as_str();
    let word = check_word(checkin.direction);

    if !employee.is_active() {
        return Err(rejected(
            id,
            format!(
                "Transactions cannot be created for an inactive employee {}",
                employee.employee_name
            ),
        ));
    }

    if checkin.time.date() < now.date() {
        return Err(rejected(
            id,
            format!(
                "Cannot {} for past dates. Please select the current date or consult HR department.",
                word
            ),
        ));
    }

    if checkin.time > now {
        return Err(rejected(
            id,
            format!("{} can't be set for the future date/time", word.to_lowercase()),
        ));
    }

    let existing = repository.list_checkins(&CheckinFilter {
        employee_id: Some(checkin.employee_id.clone()),
        ..Default::default()
    })?;

    if existing.iter().any(|log| {
        log.id != checkin.id && log.time == checkin.time && log.direction == checkin.direction
    }) {
        return Err(rejected(
            id,
            "This employee already has a log with the same timestamp.",
        ));
    }

    let occurrence = resolve_occurrence(repository, config, &employee, checkin.time)?;
    if let Some(occurrence) = &occurrence {
        let shift = config.get_shift_type(&occurrence.shift_type)?;
        if shift.pairing_mode == PairingMode::StrictByDirection
            && checkin.direction.is_none()
            && !checkin.skip_auto_attendance
        {
            return Err(rejected(
                id,
                format!(
                    "Log Type is required for check-ins falling in the shift: {}.",
                    shift.name
                ),
            ));
        }
    }
    if checkin.attendance.is_none() {
        checkin.shift = occurrence;
    }

    let date = checkin.time.date();
    if repository
        .list_leave_applications(id)?
        .iter()
        .any(|leave| leave.blocks_checkin_on(date))
    {
        return Err(rejected(
            id,
            format!("Not Permitted: Leave has been approved on the same date {}", date),
        ));
    }

    if checkin.direction == Some(LogDirection::Out)
        && !existing
            .iter()
            .any(|log| log.time.date() == date && log.direction == Some(LogDirection::In))
    {
        return Err(rejected(id, "Please add check-in first"));
    }

    if let Some(last) = existing.iter().rfind(|log| log.id != checkin.id) {
        if checkin.direction.is_some()
            && last.direction == checkin.direction
            && last.time.date() == now.date()
        {
            let expected = checkin.direction.map(|d| d.opposite());
            return Err(rejected(
                id,
                format!(
                    "You cannot mark consecutive '{}' entries on the same day without a '{}' entry first.",
                    word,
                    check_word(expected)
                ),
            ));
        }
        if checkin.time < last.time {
            return Err(rejected(
                id,
                "Current log time cannot be earlier than the previous log time.",
            ));
        }
    }

    debug!(
        employee = %id,
        time = %checkin.time,
        shift = ?checkin.shift.as_ref().map(|s| s.shift_type.as_str()),
        "Check-in validated"
    );
    Ok(checkin)
}

/// Shift occurrence of the employee whose actual window contains `time`.
///
/// The previous day's shift is tried first so early-morning logs of an overnight
/// shift belong to the day it started.
pub fn resolve_occurrence(
    repository: &dyn HrRepository,
    config: &ConfigLoader,
    employee: &Employee,
    time: NaiveDateTime,
) -> EngineResult<Option<ShiftOccurrence>> {
    let assignments = repository.list_shift_assignments()?;
    for date in candidate_dates(time) {
        let Some(name) = resolve_shift_name(employee, &assignments, date) else {
            continue;
        };
        let occurrence = occurrence_on(config.get_shift_type(&name)?, date);
        if occurrence.accepts(time) {
            return Ok(Some(occurrence));
        }
    }
    Ok(None)
}

/// Validates and stores a log.
pub fn record_checkin(
    repository: &dyn HrRepository,
    config: &ConfigLoader,
    checkin: EmployeeCheckin,
    now: NaiveDateTime,
) -> EngineResult<EmployeeCheckin> {
    let checkin = validate_checkin(repository, config, checkin, now)?;
    let stored = repository.insert_checkin(checkin)?;
    info!(
        employee = %stored.employee_id,
        checkin = %stored.id,
        direction = ?stored.direction,
        "Check-in recorded"
    );
    Ok(stored)
}

/// A punch reported by a biometric device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePunch {
    /// Identifier the device knows the employee by.
    pub attendance_device_id: String,
    /// When the punch happened.
    pub timestamp: NaiveDateTime,
    /// Device or location the punch came from.
    pub device_id: Option<String>,
    /// Direction, if the device reports one.
    pub direction: Option<LogDirection>,
    /// Exclude the log from auto attendance.
    pub skip_auto_attendance: bool,
}

/// Finds the employee registered under the device id and records the punch.
///
/// # Errors
///
/// `ValidationError` for an empty device id or when no employee uses it, plus
/// everything [`validate_checkin`] reports.
pub fn add_log_from_device(
    repository: &dyn HrRepository,
    config: &ConfigLoader,
    punch: DevicePunch,
    now: NaiveDateTime,
) -> EngineResult<EmployeeCheckin> {
    if punch.attendance_device_id.trim().is_empty() {
        return Err(EngineError::ValidationError {
            message: "'attendance_device_id' and 'timestamp' are required.".to_string(),
        });
    }

    let employee = repository
        .find_employee_by_device_id(&punch.attendance_device_id)?
        .ok_or_else(|| EngineError::ValidationError {
            message: format!(
                "No Employee found for the given employee field value. 'attendance_device_id': {}",
                punch.attendance_device_id
            ),
        })?;

    let checkin = EmployeeCheckin {
        id: String::new(),
        employee_id: employee.id,
        time: punch.timestamp,
        direction: punch.direction,
        device_id: punch.device_id,
        skip_auto_attendance: punch.skip_auto_attendance,
        attendance: None,
        shift: None,
    };
    record_checkin(repository, config, checkin, now)
}
