//! Skill error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors the intent router can return.
///
/// Collaborator failures (Dashboard, SNMP) never show up here: handlers turn
/// them into spoken responses.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("invalid intent: {0}")]
    UnknownIntent(String),

    #[error("intent request carried no intent")]
    MissingIntent,

    #[error("request is for application {0}, not this skill")]
    InvalidApplication(String),
}

/// Convenience alias.
pub type SkillResult<T> = Result<T, SkillError>;

/// API error type that converts to proper HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl From<SkillError> for ApiError {
    fn from(err: SkillError) -> Self {
        match err {
            SkillError::InvalidApplication(_) => ApiError::Forbidden(err.to_string()),
            SkillError::UnknownIntent(_) | SkillError::MissingIntent => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;
