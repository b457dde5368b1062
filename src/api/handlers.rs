//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::attendance::AutoAttendanceProcessor;
use crate::calculation::derive_attendance;
use crate::config::ConfigLoader;

use super::request::{CalculateAttendanceRequest, ProcessShiftRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/calculate", post(calculate_handler))
        .route("/shift-types/:name/process", post(process_shift_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the bad field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /attendance/calculate.
///
/// Pairs and classifies one shift occurrence's logs under the named shift type.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateAttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance calculation request");

    let mut request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let shift = match state.config().get_shift_type(&request.shift_type) {
        Ok(shift) => shift,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                shift_type = %request.shift_type,
                "Shift type not found"
            );
            return error_response(err.into());
        }
    };

    let Some(first) = request.logs.first() else {
        return error_response(ApiErrorResponse::bad_request("logs must not be empty"));
    };
    let shift_start = first.shift_start;
    if request
        .logs
        .iter()
        .any(|log| log.shift_type != shift.name || log.shift_start != shift_start)
    {
        warn!(correlation_id = %correlation_id, "Logs span several shift occurrences");
        return error_response(ApiErrorResponse::bad_request(
            "all logs must belong to one occurrence of the requested shift type",
        ));
    }
    request.logs.sort_by_key(|log| log.timestamp);

    let start_time = Instant::now();
    let Some(result) = derive_attendance(shift, &request.logs) else {
        return error_response(ApiErrorResponse::bad_request("logs must not be empty"));
    };
    info!(
        correlation_id = %correlation_id,
        shift_type = %shift.name,
        logs = request.logs.len(),
        status = ?result.status,
        total_hours = %result.total_hours,
        duration_us = start_time.elapsed().as_micros(),
        "Attendance calculated"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for POST /shift-types/{name}/process.
///
/// Runs auto attendance for one shift type against the shared repository. A sync
/// time in the body applies to this run only.
async fn process_shift_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<ProcessShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, shift_type = %name, "Processing shift request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let synced: ConfigLoader;
    let config = match request.last_sync_of_checkin {
        Some(last_sync) => match state.config().with_last_sync(&name, last_sync) {
            Ok(updated) => {
                synced = updated;
                &synced
            }
            Err(err) => return error_response(err.into()),
        },
        None => state.config(),
    };

    let start_time = Instant::now();
    let processor = AutoAttendanceProcessor::new(config, state.repository());
    match processor.process_shift(&name) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                shift_type = %name,
                marked = summary.marked,
                absent_marked = summary.absent_marked,
                duration_us = start_time.elapsed().as_micros(),
                "Shift processed"
            );
            json_response(StatusCode::OK, summary)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Shift processing failed"
            );
            error_response(err.into())
        }
    }
}
