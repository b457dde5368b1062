//! Working hours calculation from check-in logs.
//!
//! Given the chronologically ordered logs of one employee for one shift occurrence,
//! this module pairs them into IN/OUT spans and sums the elapsed time. Two independent
//! settings of the shift type drive it: how directions are determined
//! ([`PairingMode`]) and which spans count ([`AggregationMode`]).

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::config::{AggregationMode, PairingMode};
use crate::models::{CheckEvent, WorkInterval, WorkingHours};

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Hours between two timestamps, rounded to 2 decimal places.
///
/// Rounding uses banker's rounding on the exact elapsed seconds, so the result never
/// truncates. A reversed pair yields negative hours.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::time_diff_in_hours;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let hours = time_diff_in_hours(at("2024-03-04 09:00:00"), at("2024-03-04 17:45:00"));
/// assert_eq!(hours, Decimal::new(875, 2)); // 8.75
/// ```
pub fn time_diff_in_hours(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let elapsed_seconds = Decimal::new((end - start).num_milliseconds(), 3);
    (elapsed_seconds / SECONDS_PER_HOUR).round_dp(2)
}

/// Calculates total working hours for the logs of one shift occurrence.
///
/// The logs must be sorted by timestamp and belong to one employee and one shift
/// occurrence. Degenerate input (empty, a single log, missing directions) never fails;
/// it resolves to zero hours and absent times.
///
/// | pairing | aggregation | behaviour |
/// |---|---|---|
/// | Alternating | FirstLastOnly | first log is IN, last log is OUT |
/// | Alternating | EveryValidPair | logs (0,1), (2,3), ... summed; a trailing log is dropped; no in/out times |
/// | StrictByDirection | FirstLastOnly | first IN to last OUT, zero if either is missing |
/// | StrictByDirection | EveryValidPair | each IN closed by the next OUT; a dangling IN runs to the scheduled shift end |
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_working_hours;
/// use attendance_engine::config::{AggregationMode, PairingMode};
///
/// let result = calculate_working_hours(&[], PairingMode::Alternating, AggregationMode::FirstLastOnly);
/// assert!(result.total_hours.is_zero());
/// assert_eq!(result.in_time, None);
/// ```
pub fn calculate_working_hours(
    logs: &[CheckEvent],
    pairing: PairingMode,
    aggregation: AggregationMode,
) -> WorkingHours {
    match (pairing, aggregation) {
        (PairingMode::Alternating, AggregationMode::FirstLastOnly) => first_and_last_log(logs),
        (PairingMode::Alternating, AggregationMode::EveryValidPair) => consecutive_pairs(logs),
        (PairingMode::StrictByDirection, AggregationMode::FirstLastOnly) => {
            first_in_last_out(logs)
        }
        (PairingMode::StrictByDirection, AggregationMode::EveryValidPair) => {
            matched_in_out_pairs(logs)
        }
    }
}

fn first_and_last_log(logs: &[CheckEvent]) -> WorkingHours {
    let (Some(first), Some(last)) = (logs.first(), logs.last()) else {
        return WorkingHours::default();
    };

    WorkingHours {
        total_hours: time_diff_in_hours(first.timestamp, last.timestamp),
        in_time: Some(first.timestamp),
        out_time: (logs.len() >= 2).then_some(last.timestamp),
    }
}

// In/out times stay empty here even when pairs were counted; callers rely on that.
fn consecutive_pairs(logs: &[CheckEvent]) -> WorkingHours {
    let total_hours = logs
        .chunks_exact(2)
        .map(|pair| time_diff_in_hours(pair[0].timestamp, pair[1].timestamp))
        .sum();

    WorkingHours {
        total_hours,
        in_time: None,
        out_time: None,
    }
}

fn first_in_last_out(logs: &[CheckEvent]) -> WorkingHours {
    let first_in = logs.iter().find(|log| log.is_in());
    let last_out = logs.iter().rev().find(|log| log.is_out());

    match (first_in, last_out) {
        (Some(check_in), Some(check_out)) => WorkingHours {
            total_hours: time_diff_in_hours(check_in.timestamp, check_out.timestamp),
            in_time: Some(check_in.timestamp),
            out_time: Some(check_out.timestamp),
        },
        _ => WorkingHours::default(),
    }
}

fn matched_in_out_pairs(logs: &[CheckEvent]) -> WorkingHours {
    let mut result = WorkingHours::default();
    let mut pending_in: Option<&CheckEvent> = None;

    for log in logs {
        match pending_in {
            None => {
                if log.is_in() {
                    pending_in = Some(log);
                    result.in_time.get_or_insert(log.timestamp);
                }
            }
            Some(check_in) => {
                if log.is_out() {
                    let interval = WorkInterval {
                        start_time: check_in.timestamp,
                        end_time: log.timestamp,
                    };
                    result.total_hours += interval.hours();
                    result.out_time = Some(log.timestamp);
                    pending_in = None;
                }
            }
        }
    }

    if let Some(check_in) = pending_in {
        let interval = WorkInterval {
            start_time: check_in.timestamp,
            end_time: check_in.shift_end,
        };
        result.total_hours += interval.hours();
        result.out_time = Some(check_in.shift_end);
    }

    result
}
