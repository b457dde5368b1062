//! Attendance classification.
//!
//! This module turns the working hours of one shift occurrence into an
//! [`AttendanceResult`]: the Present / Half Day / Absent status plus the late
//! entry and early exit flags.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ShiftTypeConfig;
use crate::models::{AttendanceResult, AttendanceStatus, CheckEvent};

use super::working_hours::calculate_working_hours;

/// Shift settings the classifier reads.
///
/// A threshold of `None` or zero is treated as not configured.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassificationRules {
    /// Flag check-ins after the grace period.
    pub enable_late_marking: bool,
    /// Minutes after the shift start before a check-in is late.
    pub late_grace_minutes: u32,
    /// Flag check-outs before the grace period.
    pub enable_early_marking: bool,
    /// Minutes before the shift end after which a check-out is not early.
    pub early_grace_minutes: u32,
    /// Working hours below which the day is Absent.
    pub absent_threshold_hours: Option<Decimal>,
    /// Working hours below which the day is a Half Day.
    pub half_day_threshold_hours: Option<Decimal>,
}

fn configured(threshold: Option<Decimal>) -> Option<Decimal> {
    threshold.filter(|hours| !hours.is_zero())
}

/// Status for a number of worked hours under the given thresholds.
///
/// The absent threshold is checked first, so it wins when both match.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{ClassificationRules, status_for_hours};
/// use attendance_engine::models::AttendanceStatus;
/// use rust_decimal::Decimal;
///
/// let rules = ClassificationRules {
///     absent_threshold_hours: Some(Decimal::new(4, 0)),
///     half_day_threshold_hours: Some(Decimal::new(6, 0)),
///     ..Default::default()
/// };
/// assert_eq!(status_for_hours(Decimal::new(35, 1), &rules), AttendanceStatus::Absent);
/// assert_eq!(status_for_hours(Decimal::new(5, 0), &rules), AttendanceStatus::HalfDay);
/// assert_eq!(status_for_hours(Decimal::new(6, 0), &rules), AttendanceStatus::Present);
/// ```
pub fn status_for_hours(total_hours: Decimal, rules: &ClassificationRules) -> AttendanceStatus {
    if configured(rules.absent_threshold_hours).is_some_and(|absent| total_hours < absent) {
        return AttendanceStatus::Absent;
    }
    if configured(rules.half_day_threshold_hours).is_some_and(|half| total_hours < half) {
        return AttendanceStatus::HalfDay;
    }
    AttendanceStatus::Present
}

/// Classifies one shift occurrence.
///
/// Late entry means the check-in is strictly after `shift_start + late grace`;
/// early exit means the check-out is strictly before `shift_end - early grace`.
/// Both flags are computed independently of the status.
///
/// # Arguments
///
/// * `total_hours` - Working hours from [`calculate_working_hours`]
/// * `shift_start` / `shift_end` - Scheduled bounds of the occurrence
/// * `in_time` / `out_time` - Times reported by the pairing
/// * `rules` - Grace periods and thresholds of the shift type
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{ClassificationRules, classify_attendance};
/// use attendance_engine::models::AttendanceStatus;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let rules = ClassificationRules {
///     enable_late_marking: true,
///     late_grace_minutes: 15,
///     ..Default::default()
/// };
/// let result = classify_attendance(
///     Decimal::new(8, 0),
///     at("2024-03-04 09:00:00"),
///     at("2024-03-04 18:00:00"),
///     Some(at("2024-03-04 09:16:00")),
///     Some(at("2024-03-04 17:16:00")),
///     &rules,
/// );
/// assert_eq!(result.status, AttendanceStatus::Present);
/// assert!(result.late_entry);
/// ```
pub fn classify_attendance(
    total_hours: Decimal,
    shift_start: NaiveDateTime,
    shift_end: NaiveDateTime,
    in_time: Option<NaiveDateTime>,
    out_time: Option<NaiveDateTime>,
    rules: &ClassificationRules,
) -> AttendanceResult {
    // A cutoff outside the representable range raises no flag.
    let late_cutoff =
        shift_start.checked_add_signed(Duration::minutes(i64::from(rules.late_grace_minutes)));
    let early_cutoff =
        shift_end.checked_sub_signed(Duration::minutes(i64::from(rules.early_grace_minutes)));

    let late_entry = rules.enable_late_marking
        && in_time.zip(late_cutoff).is_some_and(|(t, cutoff)| t > cutoff);
    let early_exit = rules.enable_early_marking
        && out_time.zip(early_cutoff).is_some_and(|(t, cutoff)| t < cutoff);

    AttendanceResult {
        status: status_for_hours(total_hours, rules),
        total_hours,
        late_entry,
        early_exit,
        in_time,
        out_time,
    }
}

/// Derives attendance for the logs of one shift occurrence under a shift type.
///
/// Returns `None` for an empty group, which has no shift bounds to classify against.
pub fn derive_attendance(shift: &ShiftTypeConfig, logs: &[CheckEvent]) -> Option<AttendanceResult> {
    let first = logs.first()?;
    let hours = calculate_working_hours(logs, shift.pairing_mode, shift.aggregation_mode);

    Some(classify_attendance(
        hours.total_hours,
        first.shift_start,
        first.shift_end,
        hours.in_time,
        hours.out_time,
        &shift.classification_rules(),
    ))
}
