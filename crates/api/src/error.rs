use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use scribekit_transcription::TranscribeError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    RateLimited(String),
    Internal(String),
    Validation(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            ApiError::RateLimited(msg) => write!(f, "Rate limited: {msg}"),
            ApiError::Internal(msg) => write!(f, "Internal error: {msg}"),
            ApiError::Validation(msg) => write!(f, "Validation: {msg}"),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, "rate_limited", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<TranscribeError> for ApiError {
    fn from(err: TranscribeError) -> Self {
        let message = err.to_string();
        match err {
            TranscribeError::NotFound(_)
            | TranscribeError::DirectoryNotFound(_)
            | TranscribeError::TranscriptNotFound(_) => ApiError::NotFound(message),
            TranscribeError::NotADirectory(_) | TranscribeError::BadRequest(_) => {
                ApiError::BadRequest(message)
            }
            TranscribeError::InvalidCredentials => ApiError::Unauthorized(message),
            TranscribeError::QuotaOrAuthError => ApiError::Forbidden(message),
            TranscribeError::RateLimited => ApiError::RateLimited(message),
            TranscribeError::DurationProbeFailed(_)
            | TranscribeError::RemoteError { .. }
            | TranscribeError::TranscriptReadFailed(_)
            | TranscribeError::Unknown(_) => ApiError::Internal(message),
        }
    }
}
