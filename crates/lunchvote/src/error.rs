use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use lunchvote_core::storage::{repository_error_to_status_code, RepositoryError};

/// Converts a repository error into an HTTP response.
///
/// Client errors are warn-logged; server errors (invariant violations,
/// query failures) are error-logged, since they point at a bug or an
/// unhealthy store rather than bad input.
pub fn repository_error_response(error: RepositoryError) -> Response {
    let status = StatusCode::from_u16(repository_error_to_status_code(&error))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        tracing::error!(error = %error, "Repository error");
    } else {
        tracing::warn!(status = %status, error = %error, "Request failed");
    }

    (status, error.to_string()).into_response()
}

/// Error response with message (for validation errors).
pub fn validation_error_response(message: impl Into<String>) -> Response {
    let msg = message.into();
    tracing::warn!(message = %msg, "Validation failed");
    (StatusCode::BAD_REQUEST, msg).into_response()
}
