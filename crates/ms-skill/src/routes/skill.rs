//! Skill request endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use ms_protocol::RequestEnvelope;

use crate::error::ApiResult;
use crate::state::AppState;

/// POST /skill: handle one request envelope.
///
/// Returns the response envelope, or an empty 200 when no speech is owed.
pub async fn handle_skill_request(
    State(state): State<AppState>,
    Json(envelope): Json<RequestEnvelope>,
) -> ApiResult<Response> {
    match state.router.handle(&envelope).await? {
        Some(response) => Ok(Json(response).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}
