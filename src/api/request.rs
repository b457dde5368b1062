//! Request types for the Attendance Engine API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::CheckEvent;

/// Request body for `POST /attendance/calculate`.
///
/// The logs must all belong to one occurrence of `shift_type`; they are sorted by
/// time before pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateAttendanceRequest {
    /// Name of the configured shift type whose rules apply.
    pub shift_type: String,
    /// The occurrence's check-in logs.
    pub logs: Vec<CheckEvent>,
}

/// Request body for `POST /shift-types/{name}/process`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessShiftRequest {
    /// Moves the shift type's last device sync before processing. Logs of shift
    /// occurrences ending before this date are considered complete.
    #[serde(default, alias = "now")]
    pub last_sync_of_checkin: Option<NaiveDateTime>,
}
