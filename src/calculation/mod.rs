//! Calculation logic for the Attendance Engine.
//!
//! This module contains the pure functions behind attendance and allowances:
//! pairing check-in logs into working hours, classifying a shift occurrence as
//! Present / Half Day / Absent with late entry and early exit flags, resolving
//! shift occurrence windows, counting working days and computing the monthly
//! fuel allowance. None of these functions fail or touch storage.

mod attendance_status;
mod fuel_allowance;
mod shift_window;
mod working_days;
mod working_hours;

pub use attendance_status::{
    ClassificationRules, classify_attendance, derive_attendance, status_for_hours,
};
pub use fuel_allowance::{
    average_fuel_delta, calculate_fuel_allowance, clamp_fuel_allowance, commute_days,
    previous_month,
};
pub use shift_window::{candidate_dates, find_occurrence, occurrence_on};
pub use working_days::{
    WorkingDaysSummary, count_working_days, date_range, overlap_days, working_days_summary,
};
pub use working_hours::{calculate_working_hours, time_diff_in_hours};
