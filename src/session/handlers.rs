//! REST API handlers for session lifecycle

use super::{helpers::new_session_id, models::SessionResponse, state::SharedState};
use crate::error::OfferError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
    Json, Router,
};

/// Creates routes for session operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:session_id", delete(end_session))
}

/// Endpoint: POST /sessions
/// Starts an empty session with its own catalog and offer.
async fn create_session(State(state): State<SharedState>) -> impl IntoResponse {
    let session_id = state.create_session(new_session_id());

    (
        StatusCode::CREATED,
        Json(SessionResponse {
            status: "created".to_string(),
            session_id,
        }),
    )
}

/// Endpoint: DELETE /sessions/:session_id
/// Discards the session and everything in it.
async fn end_session(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, OfferError> {
    if !state.end_session(&session_id) {
        return Err(OfferError::session_not_found(&session_id));
    }

    Ok(Json(SessionResponse {
        status: "ended".to_string(),
        session_id,
    }))
}
