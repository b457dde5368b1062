//! Monthly fuel allowance calculation.
//!
//! The allowance reimburses the commute for the working days of the previous
//! month at the month's average fuel price increase:
//!
//! ```text
//! allowance = distance_km × 2 × working_days / mileage × average_delta
//! ```

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::config::AllowancePolicy;
use crate::models::{FuelPrice, LeaveApplication, WorkFromHome};

use super::working_days::overlap_days;

/// First and last day of the month before `today`.
pub fn previous_month(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first_of_this_month = today.with_day(1).unwrap_or(today);
    let end = first_of_this_month - Duration::days(1);
    let start = end.with_day(1).unwrap_or(end);
    (start, end)
}

/// Mean of `fuel_amount - base_fuel_amount` over the prices dated in `[start, end]`.
///
/// Zero when no price was recorded in the period.
pub fn average_fuel_delta(prices: &[FuelPrice], start: NaiveDate, end: NaiveDate) -> Decimal {
    let deltas: Vec<Decimal> = prices
        .iter()
        .filter(|price| price.date >= start && price.date <= end)
        .map(|price| price.fuel_amount - price.base_fuel_amount)
        .collect();

    if deltas.is_empty() {
        return Decimal::ZERO;
    }
    deltas.iter().sum::<Decimal>() / Decimal::from(deltas.len())
}

/// Days of `[start, end]` an employee commuted.
///
/// Every calendar day counts except holidays, approved full-day leave and approved
/// work from home. Leave and work from home spanning the month boundary only count
/// their days inside the month. Never negative.
pub fn commute_days(
    start: NaiveDate,
    end: NaiveDate,
    holiday_count: usize,
    leaves: &[LeaveApplication],
    work_from_home: &[WorkFromHome],
) -> i64 {
    let calendar_days = overlap_days(start, end, start, end);
    let holidays = i64::try_from(holiday_count).unwrap_or(i64::MAX);

    let leave_days: i64 = leaves
        .iter()
        .filter(|leave| leave.is_approved() && !leave.half_day)
        .map(|leave| overlap_days(leave.from_date, leave.to_date, start, end))
        .sum();

    let wfh_days: i64 = work_from_home
        .iter()
        .filter(|wfh| wfh.is_approved())
        .map(|wfh| overlap_days(wfh.from_date, wfh.to_date, start, end))
        .sum();

    (calendar_days - holidays - leave_days - wfh_days).max(0)
}

/// Unclamped allowance for one employee, rounded to 2 decimal places.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_fuel_allowance;
/// use rust_decimal::Decimal;
///
/// // 15 km each way, 20 days, 10 km/l, 12.5 per litre increase
/// let amount = calculate_fuel_allowance(
///     Decimal::new(15, 0),
///     20,
///     Decimal::new(10, 0),
///     Decimal::new(125, 1),
/// );
/// assert_eq!(amount, Decimal::new(750, 0));
/// ```
pub fn calculate_fuel_allowance(
    distance_km: Decimal,
    working_days: i64,
    mileage_km_per_litre: Decimal,
    average_delta: Decimal,
) -> Decimal {
    if average_delta.is_zero() || mileage_km_per_litre.is_zero() {
        return Decimal::ZERO;
    }
    (distance_km * Decimal::TWO * Decimal::from(working_days) / mileage_km_per_litre
        * average_delta)
        .round_dp(2)
}

/// Clamps an allowance into the policy's `[minimum, maximum]` range.
pub fn clamp_fuel_allowance(amount: Decimal, policy: &AllowancePolicy) -> Decimal {
    if amount < policy.minimum_fuel_allowance {
        policy.minimum_fuel_allowance
    } else if amount > policy.maximum_fuel_allowance {
        policy.maximum_fuel_allowance
    } else {
        amount
    }
}
