//! Check-in log models.
//!
//! An [`EmployeeCheckin`] is the stored log as written by a device or the mobile
//! app. A [`CheckEvent`] is the read-only view of a log that has been attributed to a
//! shift occurrence; it is what the working-hours calculation consumes.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ShiftOccurrence;

/// Direction of a punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogDirection {
    /// Check-in.
    #[serde(rename = "IN")]
    In,
    /// Check-out.
    #[serde(rename = "OUT")]
    Out,
}

impl LogDirection {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> LogDirection {
        match self {
            LogDirection::In => LogDirection::Out,
            LogDirection::Out => LogDirection::In,
        }
    }

    /// Lowercase label used in user-facing messages ("in" / "out").
    pub fn label(&self) -> &'static str {
        match self {
            LogDirection::In => "in",
            LogDirection::Out => "out",
        }
    }
}

/// A single check-in or check-out record attributed to a shift occurrence.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{CheckEvent, LogDirection};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let event = CheckEvent {
///     id: "CHK-0001".to_string(),
///     employee_id: "EMP-0001".to_string(),
///     timestamp: at("2024-03-04 09:02:00"),
///     direction: Some(LogDirection::In),
///     shift_type: "General".to_string(),
///     shift_start: at("2024-03-04 09:00:00"),
///     shift_end: at("2024-03-04 18:00:00"),
///     shift_actual_end: at("2024-03-04 19:00:00"),
/// };
/// assert!(event.is_in());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckEvent {
    /// Identifier of the stored log.
    pub id: String,
    /// The employee who punched.
    pub employee_id: String,
    /// When the punch happened.
    pub timestamp: NaiveDateTime,
    /// Recorded direction, if the device reported one.
    #[serde(default)]
    pub direction: Option<LogDirection>,
    /// Name of the shift type the log was attributed to.
    pub shift_type: String,
    /// Scheduled start of the shift occurrence.
    pub shift_start: NaiveDateTime,
    /// Scheduled end of the shift occurrence.
    pub shift_end: NaiveDateTime,
    /// End of the window in which check-outs still count for this occurrence.
    pub shift_actual_end: NaiveDateTime,
}

impl CheckEvent {
    /// Returns true if the event was recorded as a check-in.
    pub fn is_in(&self) -> bool {
        self.direction == Some(LogDirection::In)
    }

    /// Returns true if the event was recorded as a check-out.
    pub fn is_out(&self) -> bool {
        self.direction == Some(LogDirection::Out)
    }

    /// The date attendance for this event's shift occurrence is marked on.
    pub fn attendance_date(&self) -> NaiveDate {
        self.shift_start.date()
    }
}

/// A stored check-in log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCheckin {
    /// Identifier of the log; assigned by the repository on insert.
    #[serde(default)]
    pub id: String,
    /// The employee who punched.
    pub employee_id: String,
    /// When the punch happened.
    pub time: NaiveDateTime,
    /// Recorded direction, if any.
    #[serde(default)]
    pub direction: Option<LogDirection>,
    /// Device or location the punch came from.
    #[serde(default)]
    pub device_id: Option<String>,
    /// Excludes the log from auto attendance.
    #[serde(default)]
    pub skip_auto_attendance: bool,
    /// Attendance record the log has been linked to.
    #[serde(default)]
    pub attendance: Option<String>,
    /// Shift occurrence the log falls into, filled during validation.
    #[serde(default)]
    pub shift: Option<ShiftOccurrence>,
}

impl EmployeeCheckin {
    /// Returns the calculation view of this log, or `None` when it has no shift.
    pub fn to_event(&self) -> Option<CheckEvent> {
        let shift = self.shift.as_ref()?;
        Some(CheckEvent {
            id: self.id.clone(),
            employee_id: self.employee_id.clone(),
            timestamp: self.time,
            direction: self.direction,
            shift_type: shift.shift_type.clone(),
            shift_start: shift.start,
            shift_end: shift.end,
            shift_actual_end: shift.actual_end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_checkin(shift: Option<ShiftOccurrence>) -> EmployeeCheckin {
        EmployeeCheckin {
            id: "CHK-0001".to_string(),
            employee_id: "EMP-0001".to_string(),
            time: make_datetime("2024-03-04", "09:05:00"),
            direction: Some(LogDirection::In),
            device_id: None,
            skip_auto_attendance: false,
            attendance: None,
            shift,
        }
    }

    #[test]
    fn test_direction_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&LogDirection::In).unwrap(), "\"IN\"");
        assert_eq!(serde_json::to_string(&LogDirection::Out).unwrap(), "\"OUT\"");
    }

    #[test]
    fn test_direction_opposite_and_label() {
        assert_eq!(LogDirection::In.opposite(), LogDirection::Out);
        assert_eq!(LogDirection::Out.label(), "out");
    }

    #[test]
    fn test_checkin_without_shift_has_no_event() {
        assert!(make_checkin(None).to_event().is_none());
    }

    #[test]
    fn test_checkin_with_shift_converts_to_event() {
        let occurrence = ShiftOccurrence {
            shift_type: "General".to_string(),
            start: make_datetime("2024-03-04", "09:00:00"),
            end: make_datetime("2024-03-04", "18:00:00"),
            actual_start: make_datetime("2024-03-04", "08:00:00"),
            actual_end: make_datetime("2024-03-04", "19:00:00"),
        };
        let event = make_checkin(Some(occurrence)).to_event().unwrap();

        assert_eq!(event.shift_type, "General");
        assert_eq!(event.shift_end, make_datetime("2024-03-04", "18:00:00"));
        assert!(event.is_in());
        assert!(!event.is_out());
        assert_eq!(
            event.attendance_date(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
    }

    #[test]
    fn test_event_deserialization_without_direction() {
        let json = r#"{
            "id": "CHK-0002",
            "employee_id": "EMP-0001",
            "timestamp": "2024-03-04T12:00:00",
            "shift_type": "General",
            "shift_start": "2024-03-04T09:00:00",
            "shift_end": "2024-03-04T18:00:00",
            "shift_actual_end": "2024-03-04T19:00:00"
        }"#;

        let event: CheckEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.direction, None);
        assert!(!event.is_in());
    }
}
