//! Vote result handler.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use lunchvote_core::storage::DayWindow;

use crate::{error::repository_error_response, state::AppState};

/// Get today's winning menus (GET /api/votes/result).
///
/// Served from the result cache; recomputed from the menu ledger on miss.
pub async fn vote_result(State(state): State<AppState>) -> Response {
    let window = DayWindow::ending(chrono::Local::now().date_naive());

    match state.results.get_result(window).await {
        Ok(winners) => Json(winners).into_response(),
        Err(err) => repository_error_response(err),
    }
}
