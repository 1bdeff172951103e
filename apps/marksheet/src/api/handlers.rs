//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        CreateStudentRequest, HealthResponse, StatusResponse, StudentResponse, UpdateMarksQuery,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use marksheet_core::{MarksheetError, StudentId};

/// Map a registry error to its HTTP status.
pub fn status_for(err: &MarksheetError) -> StatusCode {
    match err {
        MarksheetError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        MarksheetError::NotFound(_) => StatusCode::NOT_FOUND,
        MarksheetError::SerializationError(_) | MarksheetError::IoError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn log_rejection(operation: &'static str, err: &MarksheetError) {
    match err {
        MarksheetError::InvalidInput { field, message } => {
            tracing::info!(operation, field = *field, "Rejected: {}", message);
        }
        MarksheetError::NotFound(id) => {
            tracing::info!(operation, student_id = id.0, "Student not found");
        }
        other => tracing::error!(operation, "Storage failure: {}", other),
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get registry status.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.registry.read().await;
    match registry.student_count() {
        Ok(student_count) => (
            StatusCode::OK,
            Json(StatusResponse {
                student_count,
                backend: registry.backend_name().to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            log_rejection("status", &e);
            (status_for(&e), Json(StudentResponse::error(&e))).into_response()
        }
    }
}

// =============================================================================
// CREATE HANDLER
// =============================================================================

/// Create a student record.
pub async fn create_student_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    let input = request.into_new_student();

    let mut registry = state.registry.write().await;
    match registry.create_student(&input) {
        Ok(record) => {
            tracing::info!(student_id = record.id().0, "Student created");
            (StatusCode::OK, Json(StudentResponse::success(&record)))
        }
        Err(e) => {
            log_rejection("create", &e);
            (status_for(&e), Json(StudentResponse::error(&e)))
        }
    }
}

// =============================================================================
// UPDATE MARKS HANDLER
// =============================================================================

/// Replace the marks of a student record.
///
/// The write lock is held across fetch, validate and save so concurrent
/// updates to the same id cannot interleave.
pub async fn update_marks_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<UpdateMarksQuery>,
) -> impl IntoResponse {
    let mut registry = state.registry.write().await;
    match registry.update_student_marks(StudentId(id), query.marks1, query.marks2, query.marks3) {
        Ok(record) => {
            let results = record.results();
            tracing::info!(
                student_id = id,
                total = results.total(),
                result = results.outcome().as_str(),
                "Marks updated"
            );
            (StatusCode::OK, Json(StudentResponse::success(&record)))
        }
        Err(e) => {
            log_rejection("update_marks", &e);
            (status_for(&e), Json(StudentResponse::error(&e)))
        }
    }
}
