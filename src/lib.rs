//! Shift Attendance Engine
//!
//! This crate derives daily attendance from employee check-in logs (log pairing,
//! working-hours computation, late/early detection, status classification) and
//! implements the surrounding HR workflow rules: check-in validation, work from
//! home requests, medical reimbursements, project assignments, fuel allowances and
//! check-in reminders. Persistence is reached only through the
//! [`repository::HrRepository`] trait.

#![warn(missing_docs)]

pub mod api;
pub mod attendance;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod workflow;
