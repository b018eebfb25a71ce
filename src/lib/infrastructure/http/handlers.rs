//! API handler modules

use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::error;

use super::errors::ErrorResponse;

pub mod v1;

/// Turns a panic inside a handler into a JSON 500 response
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "Internal server error".to_string());

    error!(%details, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: details }),
    )
        .into_response()
}
