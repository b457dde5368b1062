//! Auto attendance: turning synced check-in logs into attendance records.
//!
//! The pure derivation lives in [`crate::calculation`]; this module adds the
//! storage side: picking up unprocessed logs, resolving which employees work a
//! shift, creating records with compensation on rejection, and filling the days
//! without logs with Absent records.

mod assignment;
mod auto_attendance;
mod marking;

pub use assignment::{assigned_employees, resolve_shift_name};
pub use auto_attendance::{AutoAttendanceProcessor, ProcessingSummary};
pub use marking::{
    ABSENT_THRESHOLD_COMMENT, MISSING_CHECKINS_COMMENT, MarkDecision, MarkOutcome, mark_absent,
    mark_attendance_and_link_log,
};
