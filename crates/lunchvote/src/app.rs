use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        menus::{get_menu, list_menus, publish_menu},
        restaurants::{create_restaurant, get_restaurant, list_restaurants},
        results::vote_result,
        votes::{cast_vote, move_vote},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        // Restaurant routes
        .route(
            "/restaurants",
            get(list_restaurants).post(create_restaurant),
        )
        .route("/restaurants/{id}", get(get_restaurant))
        // Menu routes
        .route("/menus", get(list_menus).post(publish_menu))
        .route("/menus/{id}", get(get_menu))
        // Vote routes
        .route("/votes", post(cast_vote))
        .route("/votes/result", get(vote_result))
        .route("/votes/{id}", put(move_vote))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
