//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod checkin;
mod document;
mod employee;
mod holiday;
mod leave;
mod notification;
mod project;
mod reimbursement;
mod shift;

pub use attendance::{AttendanceRecord, AttendanceResult, AttendanceStatus, WorkInterval, WorkingHours};
pub use checkin::{CheckEvent, EmployeeCheckin, LogDirection};
pub use document::{ApprovalStatus, AssignmentStatus, DocStatus};
pub use employee::{Employee, EmployeeStatus, TransportType};
pub use holiday::{Holiday, HolidayList};
pub use leave::{LeaveApplication, WorkFromHome};
pub use notification::{AccessAssignment, AccessStatus, Comment, Notification};
pub use project::{FuelAllowanceRecord, FuelPrice, Project, ProjectAssignment};
pub use reimbursement::{Reimbursement, ReimbursementType};
pub use shift::{ShiftAssignment, ShiftOccurrence};
