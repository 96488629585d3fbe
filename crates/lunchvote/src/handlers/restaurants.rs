//! Restaurant CRUD handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use lunchvote_core::lunch::validate_restaurant;

use crate::{
    error::{repository_error_response, validation_error_response},
    models::CreateRestaurant,
    state::AppState,
};

/// List all restaurants (GET /api/restaurants).
pub async fn list_restaurants(State(state): State<AppState>) -> Response {
    match state.restaurant_repo.list_restaurants().await {
        Ok(restaurants) => Json(restaurants).into_response(),
        Err(err) => repository_error_response(err),
    }
}

/// Create a new restaurant (POST /api/restaurants).
pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(payload): Json<CreateRestaurant>,
) -> Response {
    let restaurant = payload.into_restaurant();

    if let Err(err) = validate_restaurant(&restaurant) {
        return validation_error_response(err.to_string());
    }

    match state.restaurant_repo.create_restaurant(&restaurant).await {
        Ok(()) => {
            tracing::info!(restaurant_id = %restaurant.id, name = %restaurant.name, "Created new restaurant");
            (StatusCode::CREATED, Json(restaurant)).into_response()
        }
        Err(err) => repository_error_response(err),
    }
}

/// Get a single restaurant by ID (GET /api/restaurants/{id}).
pub async fn get_restaurant(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.restaurant_repo.get_restaurant(id).await {
        Ok(Some(restaurant)) => Json(restaurant).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => repository_error_response(err),
    }
}
