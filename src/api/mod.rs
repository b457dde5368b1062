//! HTTP API module for the Attendance Engine.
//!
//! This module provides REST endpoints for deriving attendance from a set of
//! check-in logs and for triggering auto attendance of a shift type.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculateAttendanceRequest, ProcessShiftRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
