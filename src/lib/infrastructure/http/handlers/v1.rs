//! Version 1 of the API

use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::order_mail::OrderMailService,
    infrastructure::http::{open_api::ApiDocs, state::AppState},
};

pub mod order_mail;
pub mod stoplight;
pub mod uptime;

/// Routes mounted under `/api/v1`
pub fn router<S: OrderMailService>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(stoplight::handler))
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler))
        .route("/mail-templates", get(order_mail::list_templates::handler))
        .route("/mail-histories/:id", get(order_mail::view_history::handler))
        .route("/orders/mail/preview", post(order_mail::preview::bulk_handler))
        .route("/orders/mail/send", post(order_mail::send::bulk_handler))
        .route("/orders/:id/mail", get(order_mail::index::handler))
        .route("/orders/:id/mail/preview", post(order_mail::preview::handler))
        .route("/orders/:id/mail/send", post(order_mail::send::handler))
}
