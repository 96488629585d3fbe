//! Vote casting and re-voting handlers.
//!
//! The vote's day is resolved from the local clock here at the edge; the
//! ledger itself never reads a clock.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use lunchvote_core::lunch::Vote;

use crate::{
    error::repository_error_response,
    models::{CastVote, MoveVote},
    state::AppState,
};

/// Cast a vote for today's menu (POST /api/votes).
pub async fn cast_vote(State(state): State<AppState>, Json(payload): Json<CastVote>) -> Response {
    let today = chrono::Local::now().date_naive();
    let vote = Vote::cast(payload.menu_id, payload.employee_id, today);

    match state.votes.cast_vote(&vote).await {
        Ok(()) => (StatusCode::CREATED, Json(vote)).into_response(),
        Err(err) => repository_error_response(err),
    }
}

/// Move an existing vote to another menu (PUT /api/votes/{id}).
pub async fn move_vote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MoveVote>,
) -> Response {
    match state.votes.move_vote(id, payload.menu_id).await {
        Ok(vote) => Json(vote).into_response(),
        Err(err) => repository_error_response(err),
    }
}
