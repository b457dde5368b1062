//! Shift reminders and access expiry alerts.
//!
//! Reminders are meant to be polled every minute: an employee is reminded when the
//! minutes elapsed since their shift started (or ended) match their personal
//! threshold within the policy tolerance, and they have not logged yet today.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use tracing::{debug, info};

use crate::attendance::resolve_shift_name;
use crate::config::{ConfigLoader, ShiftTypeConfig};
use crate::error::EngineResult;
use crate::models::{AccessStatus, Employee, LogDirection, Notification};
use crate::repository::{CheckinFilter, HrRepository};

/// Push title of check-in reminders.
pub const CHECKIN_REMINDER_TITLE: &str = "Don\u{2019}t Forget to Check In!";
/// Push body of check-in reminders.
pub const CHECKIN_REMINDER_MESSAGE: &str =
    "Good morning! Please remember to check in for your shift. Have a productive day!";
/// Push title of check-out reminders.
pub const CHECKOUT_REMINDER_TITLE: &str = "Time to Check Out!";
/// Push body of check-out reminders.
pub const CHECKOUT_REMINDER_MESSAGE: &str =
    "Your shift is almost over. Please remember to check out. Have a great evening!";
/// Title of access expiry notes.
pub const ACCESS_EXPIRY_TITLE: &str = "Access Expiry Notification";

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReminderKind {
    CheckIn,
    CheckOut,
}

impl ReminderKind {
    fn anchor(self, shift: &ShiftTypeConfig) -> NaiveTime {
        match self {
            ReminderKind::CheckIn => shift.start_time,
            ReminderKind::CheckOut => shift.end_time,
        }
    }

    fn direction(self) -> LogDirection {
        match self {
            ReminderKind::CheckIn => LogDirection::In,
            ReminderKind::CheckOut => LogDirection::Out,
        }
    }

    fn threshold(self, employee: &Employee) -> Option<u32> {
        match self {
            ReminderKind::CheckIn => employee.checkin_reminder_minutes,
            ReminderKind::CheckOut => employee.checkout_reminder_minutes,
        }
    }

    fn notification(self, user: String) -> Notification {
        let (title, message) = match self {
            ReminderKind::CheckIn => (CHECKIN_REMINDER_TITLE, CHECKIN_REMINDER_MESSAGE),
            ReminderKind::CheckOut => (CHECKOUT_REMINDER_TITLE, CHECKOUT_REMINDER_MESSAGE),
        };
        Notification::Push {
            user,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// Whole minutes from the last occurrence of `anchor` up to `now`, rounded.
///
/// Always in `[0, 1440)`, so a shift that started just before midnight still
/// counts from its start time.
pub fn minutes_since(anchor: NaiveTime, now: NaiveDateTime) -> i64 {
    let now_seconds = i64::from(now.time().num_seconds_from_midnight());
    let anchor_seconds = i64::from(anchor.num_seconds_from_midnight());
    let minutes = (now_seconds - anchor_seconds + 30).div_euclid(60);
    minutes.rem_euclid(MINUTES_PER_DAY)
}

/// Push reminders for employees who have not checked in after their shift started.
pub fn checkin_reminders(
    repository: &dyn HrRepository,
    config: &ConfigLoader,
    now: NaiveDateTime,
) -> EngineResult<Vec<Notification>> {
    reminders(repository, config, now, ReminderKind::CheckIn)
}

/// Push reminders for employees who have not checked out after their shift ended.
pub fn checkout_reminders(
    repository: &dyn HrRepository,
    config: &ConfigLoader,
    now: NaiveDateTime,
) -> EngineResult<Vec<Notification>> {
    reminders(repository, config, now, ReminderKind::CheckOut)
}

fn reminders(
    repository: &dyn HrRepository,
    config: &ConfigLoader,
    now: NaiveDateTime,
    kind: ReminderKind,
) -> EngineResult<Vec<Notification>> {
    let policy = &config.policies().reminders;
    let look_back = i64::from(policy.look_back_hours) * 60;
    let tolerance = i64::from(policy.tolerance_minutes);
    let today = now.date();

    let employees = repository.list_employees()?;
    let assignments = repository.list_shift_assignments()?;
    let mut notifications = Vec::new();

    for shift in config.config().shift_types().values() {
        let elapsed = minutes_since(kind.anchor(shift), now);
        if elapsed > look_back {
            continue;
        }
        if let Some(name) = &shift.holiday_list {
            if repository
                .get_holiday_list(name)?
                .is_some_and(|list| list.is_holiday(today))
            {
                debug!(shift_type = %shift.name, %today, "Holiday, no reminders");
                continue;
            }
        }

        for employee in employees.iter().filter(|e| e.is_active()) {
            if resolve_shift_name(employee, &assignments, today).as_deref()
                != Some(shift.name.as_str())
            {
                continue;
            }
            let Some(user) = &employee.user_id else {
                continue;
            };
            let threshold =
                i64::from(kind.threshold(employee).unwrap_or(policy.default_threshold_minutes));
            if (threshold - elapsed).abs() > tolerance {
                continue;
            }

            let logged = repository.list_checkins(&CheckinFilter {
                employee_id: Some(employee.id.clone()),
                on_date: Some(today),
                direction: Some(kind.direction()),
                ..Default::default()
            })?;
            if logged.is_empty() {
                notifications.push(kind.notification(user.clone()));
            }
        }
    }

    info!(kind = ?kind, count = notifications.len(), "Shift reminders prepared");
    Ok(notifications)
}

/// Private notes for the risk owner and the user of every expired access assignment.
pub fn access_expiry_alerts(repository: &dyn HrRepository) -> EngineResult<Vec<Notification>> {
    let mut notes = Vec::new();
    for assignment in repository.list_access_assignments()? {
        if assignment.status != AccessStatus::Expired {
            continue;
        }
        let content = format!(
            "Access to {} for user {} against project {} has expired. Please contact the admin to renew it.",
            assignment.tool_name, assignment.employee_name, assignment.project_name
        );
        for owner in [&assignment.risk_owner, &assignment.user] {
            notes.push(Notification::Note {
                owner: owner.clone(),
                title: ACCESS_EXPIRY_TITLE.to_string(),
                content: content.clone(),
            });
        }
    }
    info!(count = notes.len(), "Access expiry alerts prepared");
    Ok(notes)
}
