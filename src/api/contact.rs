// /contact - inquiry form submissions
//
// Create, list, fetch, and the one state transition (unread → read).
// No general update and no delete.

use super::error::{parse_id, ApiError, OrInternal};
use super::AppState;
use crate::entities::{ContactSubmission, NewContactSubmission};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::Value;
use tracing::instrument;

const INVALID_ID: &str = "Invalid submission ID";
const NOT_FOUND: &str = "Submission not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions).post(create_submission))
        .route("/:id", get(get_submission))
        .route("/:id/read", patch(mark_submission_read))
}

#[instrument(skip_all)]
async fn create_submission(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactSubmission>), ApiError> {
    let Json(input) = payload?;
    let new = NewContactSubmission::from_json(&input)?;

    let submission = state
        .storage
        .create_contact_submission(new)
        .or_internal("Failed to process contact submission")?;
    tracing::info!(id = submission.id, "contact submission received");
    Ok((StatusCode::CREATED, Json(submission)))
}

async fn list_submissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactSubmission>>, ApiError> {
    let submissions = state
        .storage
        .get_all_contact_submissions()
        .or_internal("Failed to fetch contact submissions")?;
    Ok(Json(submissions))
}

async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContactSubmission>, ApiError> {
    let Some(id) = parse_id(&id, INVALID_ID)? else {
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    state
        .storage
        .get_contact_submission(id)
        .or_internal("Failed to fetch contact submission")?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

/// PATCH /contact/:id/read - idempotent
async fn mark_submission_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContactSubmission>, ApiError> {
    let Some(id) = parse_id(&id, INVALID_ID)? else {
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    state
        .storage
        .mark_contact_submission_read(id)
        .or_internal("Failed to mark submission as read")?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}
