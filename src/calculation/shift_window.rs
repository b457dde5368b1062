//! Shift occurrence windows.
//!
//! A shift type scheduled on date D starts at `D + start_time` and ends at
//! `D + end_time`, rolling over to the next day when the end time is not after
//! the start time. The actual window widens both sides by the configured
//! check-in and check-out allowances.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::config::ShiftTypeConfig;
use crate::models::ShiftOccurrence;

/// The occurrence of `shift` that starts on `date`.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::occurrence_on;
/// use attendance_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let night = loader.get_shift_type("Night").unwrap();
/// let occurrence = occurrence_on(night, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// assert_eq!(occurrence.end.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
/// ```
pub fn occurrence_on(shift: &ShiftTypeConfig, date: NaiveDate) -> ShiftOccurrence {
    let start = date.and_time(shift.start_time);
    let mut end = date.and_time(shift.end_time);
    if end <= start {
        end += Duration::days(1);
    }

    ShiftOccurrence {
        shift_type: shift.name.clone(),
        start,
        end,
        actual_start: start
            - Duration::minutes(i64::from(shift.begin_check_in_before_start_minutes)),
        actual_end: end + Duration::minutes(i64::from(shift.allow_check_out_after_end_minutes)),
    }
}

/// Dates whose occurrence may contain `time`, previous day first.
///
/// Checking the previous day first attributes the early-morning logs of an
/// overnight shift to the day the shift started.
pub fn candidate_dates(time: NaiveDateTime) -> impl Iterator<Item = NaiveDate> {
    let date = time.date();
    [date.pred_opt(), Some(date)].into_iter().flatten()
}

/// The occurrence of `shift` whose actual window contains `time`, if any.
pub fn find_occurrence(shift: &ShiftTypeConfig, time: NaiveDateTime) -> Option<ShiftOccurrence> {
    candidate_dates(time)
        .map(|date| occurrence_on(shift, date))
        .find(|occurrence| occurrence.accepts(time))
}
