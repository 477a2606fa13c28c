// HTTP error mapping
//
//   Validation → 400 { message, errors: [{field, message}, ...] }
//   BadRequest → 400 { message }
//   NotFound   → 404 { message }
//   Internal   → 500 { message }   (cause is logged, never returned)

use crate::error::{StoreError, StoreResult};
use crate::schema::{FieldError, ValidationErrors};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

impl ErrorBody<'_> {
    fn message(message: &str) -> ErrorBody<'_> {
        ErrorBody {
            message,
            errors: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                warn!(%errors, "rejected invalid input");
                let body = ErrorBody {
                    message: "Validation error",
                    errors: Some(errors.errors()),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::BadRequest(message) => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, Json(ErrorBody::message(&message))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::message(message))).into_response()
            }
            ApiError::Internal { context, source } => {
                error!(error = %source, "{}", context);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::message(context))).into_response()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Attach the generic message a storage failure is reported with
pub trait OrInternal<T> {
    fn or_internal(self, context: &'static str) -> Result<T, ApiError>;
}

impl<T> OrInternal<T> for StoreResult<T> {
    fn or_internal(self, context: &'static str) -> Result<T, ApiError> {
        self.map_err(|source| ApiError::Internal { context, source })
    }
}

// ============================================================================
// PATH PARAMETERS
// ============================================================================

/// Ids are positive decimal integers written with digits only.
///
/// `Ok(None)` is a well-formed id too large to have ever been assigned; the
/// caller answers it with not-found like any other absent record.
pub fn parse_id(raw: &str, message: &'static str) -> Result<Option<u32>, ApiError> {
    let well_formed = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && raw.bytes().any(|b| b != b'0');
    if !well_formed {
        return Err(ApiError::BadRequest(message.to_string()));
    }
    // Only overflow can fail once the digits are checked
    Ok(raw.parse::<u32>().ok())
}

/// Absent limit means "use the default"; present must be a whole number
pub fn parse_limit(raw: Option<&str>) -> Result<Option<usize>, ApiError> {
    raw.map(|s| {
        s.parse::<usize>()
            .map_err(|_| ApiError::BadRequest("Invalid limit value".to_string()))
    })
    .transpose()
}
