//! Holiday list models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// What the holiday is for.
    #[serde(default)]
    pub description: String,
    /// True for recurring weekly offs (e.g. Sundays) rather than public holidays.
    #[serde(default)]
    pub weekly_off: bool,
}

/// A named list of holidays.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Holiday, HolidayList};
/// use chrono::NaiveDate;
///
/// let list = HolidayList {
///     name: "PK 2024".to_string(),
///     holidays: vec![Holiday {
///         date: NaiveDate::from_ymd_opt(2024, 3, 23).unwrap(),
///         description: "Pakistan Day".to_string(),
///         weekly_off: false,
///     }],
/// };
/// assert!(list.is_holiday(NaiveDate::from_ymd_opt(2024, 3, 23).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayList {
    /// Name of the list.
    pub name: String,
    /// Holidays in the list.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl HolidayList {
    /// Returns true if `date` is in the list.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.date == date)
    }

    /// Holiday dates between `start` and `end` inclusive, ascending.
    pub fn holiday_dates_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        skip_weekly_offs: bool,
    ) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .holidays
            .iter()
            .filter(|h| h.date >= start && h.date <= end)
            .filter(|h| !(skip_weekly_offs && h.weekly_off))
            .map(|h| h.date)
            .collect();
        dates.sort();
        dates.dedup();
        dates
    }
}
