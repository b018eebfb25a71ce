//! Uptime handler

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{domain::order_mail::OrderMailService, infrastructure::http::state::AppState};

/// The uptime response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UptimeResponse {
    /// The uptime of the application in seconds
    #[schema(example = 123)]
    pub uptime: i64,
}

/// Get the uptime of the application
#[utoipa::path(
    get,
    operation_id = "uptime",
    tag = "System",
    path = "/api/v1/uptime",
    responses(
        (status = StatusCode::OK, description = "Uptime response", body = UptimeResponse),
    )
)]
pub async fn handler<S: OrderMailService>(State(state): State<AppState<S>>) -> Json<UptimeResponse> {
    let uptime = Utc::now().timestamp() - state.start_time.timestamp();

    Json(UptimeResponse { uptime })
}
