//! Working day counting.
//!
//! Date ranges here are always inclusive on both ends. Weekends are Saturday
//! and Sunday.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, AttendanceStatus, DocStatus, HolidayList};

/// All dates from `start` to `end` inclusive; empty when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|date| *date <= end).collect()
}

/// Number of days of `[from, to]` that fall inside `[window_start, window_end]`.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::overlap_days;
/// use chrono::NaiveDate;
///
/// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
/// // a leave from 28 Feb to 3 Mar has 3 days in March
/// assert_eq!(overlap_days(d("2024-02-28"), d("2024-03-03"), d("2024-03-01"), d("2024-03-31")), 3);
/// ```
pub fn overlap_days(
    from: NaiveDate,
    to: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> i64 {
    let start = from.max(window_start);
    let end = to.min(window_end);
    if start > end {
        return 0;
    }
    (end - start).num_days() + 1
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts weekdays in `[start, end]` that are not holidays.
pub fn count_working_days(start: NaiveDate, end: NaiveDate, holidays: Option<&HolidayList>) -> u32 {
    let count = date_range(start, end)
        .into_iter()
        .filter(|date| is_weekday(*date))
        .filter(|date| !holidays.is_some_and(|list| list.is_holiday(*date)))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Working days of a period against an employee's leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDaysSummary {
    /// Weekdays in the period that are not holidays.
    pub total_working_days: u32,
    /// Days taken off: one per On Leave record, half per Half Day record.
    pub off_days: Decimal,
    /// `total_working_days - off_days`.
    pub employee_working_days: Decimal,
}

/// Summarises working days in `[start, end]` for one employee's attendance records.
///
/// Only submitted records dated inside the period count towards the off days.
pub fn working_days_summary(
    start: NaiveDate,
    end: NaiveDate,
    holidays: Option<&HolidayList>,
    attendance: &[AttendanceRecord],
) -> WorkingDaysSummary {
    let total_working_days = count_working_days(start, end, holidays);

    let off_days: Decimal = attendance
        .iter()
        .filter(|record| record.docstatus == DocStatus::Submitted)
        .filter(|record| record.attendance_date >= start && record.attendance_date <= end)
        .map(|record| match record.status {
            AttendanceStatus::OnLeave => Decimal::ONE,
            AttendanceStatus::HalfDay => Decimal::new(5, 1),
            AttendanceStatus::Present | AttendanceStatus::Absent => Decimal::ZERO,
        })
        .sum();

    WorkingDaysSummary {
        total_working_days,
        off_days,
        employee_working_days: Decimal::from(total_working_days) - off_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Holiday;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_holidays(dates: &[&str]) -> HolidayList {
        HolidayList {
            name: "PK 2024".to_string(),
            holidays: dates
                .iter()
                .map(|d| Holiday {
                    date: make_date(d),
                    description: "Public holiday".to_string(),
                    weekly_off: false,
                })
                .collect(),
        }
    }

    fn make_record(date: &str, status: AttendanceStatus) -> AttendanceRecord {
        let mut record = AttendanceRecord::absent("EMP-0001", make_date(date), "General");
        record.status = status;
        record
    }

    #[test]
    fn test_date_range_inclusive() {
        let dates = date_range(make_date("2024-02-28"), make_date("2024-03-01"));
        assert_eq!(
            dates,
            vec![
                make_date("2024-02-28"),
                make_date("2024-02-29"),
                make_date("2024-03-01")
            ]
        );
        assert!(date_range(make_date("2024-03-02"), make_date("2024-03-01")).is_empty());
    }

    #[test]
    fn test_overlap_days_outside_window() {
        assert_eq!(
            overlap_days(
                make_date("2024-02-01"),
                make_date("2024-02-05"),
                make_date("2024-03-01"),
                make_date("2024-03-31")
            ),
            0
        );
    }

    #[test]
    fn test_count_working_days_skips_weekends_and_holidays() {
        // March 2024 has 21 weekdays; 2024-03-21 is a Thursday, 2024-03-23 a Saturday
        let holidays = make_holidays(&["2024-03-21", "2024-03-23"]);
        let start = make_date("2024-03-01");
        let end = make_date("2024-03-31");

        assert_eq!(count_working_days(start, end, None), 21);
        assert_eq!(count_working_days(start, end, Some(&holidays)), 20);
    }

    #[test]
    fn test_working_days_summary_counts_leave() {
        let attendance = vec![
            make_record("2024-03-04", AttendanceStatus::OnLeave),
            make_record("2024-03-05", AttendanceStatus::HalfDay),
            make_record("2024-03-06", AttendanceStatus::Present),
            make_record("2024-04-01", AttendanceStatus::OnLeave),
        ];

        let summary = working_days_summary(
            make_date("2024-03-01"),
            make_date("2024-03-31"),
            None,
            &attendance,
        );

        assert_eq!(summary.total_working_days, 21);
        assert_eq!(summary.off_days, Decimal::new(15, 1));
        assert_eq!(summary.employee_working_days, Decimal::new(195, 1));
    }

    #[test]
    fn test_working_days_summary_ignores_drafts() {
        let mut draft = make_record("2024-03-04", AttendanceStatus::OnLeave);
        draft.docstatus = DocStatus::Draft;

        let summary = working_days_summary(
            make_date("2024-03-04"),
            make_date("2024-03-08"),
            None,
            &[draft],
        );

        assert_eq!(summary.off_days, Decimal::ZERO);
        assert_eq!(summary.employee_working_days, Decimal::new(5, 0));
    }
}
