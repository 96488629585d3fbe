//! Menu publishing handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use lunchvote_core::lunch::validate_menu;

use crate::{
    error::{repository_error_response, validation_error_response},
    models::PublishMenu,
    state::AppState,
};

/// Query parameters for listing menus.
#[derive(Debug, Deserialize)]
pub struct ListMenusQuery {
    /// The day to list menus for (ISO 8601: YYYY-MM-DD); defaults to today.
    pub day: Option<NaiveDate>,
}

/// List menus for a day (GET /api/menus).
pub async fn list_menus(
    State(state): State<AppState>,
    Query(query): Query<ListMenusQuery>,
) -> Response {
    let day = query
        .day
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match state.menu_repo.list_menus_for_day(day).await {
        Ok(menus) => Json(menus).into_response(),
        Err(err) => repository_error_response(err),
    }
}

/// Publish a menu (POST /api/menus).
pub async fn publish_menu(
    State(state): State<AppState>,
    Json(payload): Json<PublishMenu>,
) -> Response {
    let today = chrono::Local::now().date_naive();
    let menu = payload.into_menu(today);

    if let Err(err) = validate_menu(&menu) {
        return validation_error_response(err.to_string());
    }

    match state.menu_repo.publish_menu(&menu).await {
        Ok(()) => {
            tracing::info!(
                menu_id = %menu.id,
                restaurant_id = %menu.restaurant_id,
                day = %menu.day,
                "Published menu"
            );
            (StatusCode::CREATED, Json(menu)).into_response()
        }
        Err(err) => repository_error_response(err),
    }
}

/// Get a single menu by ID (GET /api/menus/{id}).
pub async fn get_menu(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.menu_repo.get_menu(id).await {
        Ok(Some(menu)) => Json(menu).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => repository_error_response(err),
    }
}
