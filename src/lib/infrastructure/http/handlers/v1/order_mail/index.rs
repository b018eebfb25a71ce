//! Order mail overview

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        order_mail::{OrderMailOverview, OrderMailService},
        orders::OrderId,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

use super::{MailHistoryResponse, MailTemplateResponse, OrderResponse};

/// An order with the mail sent for it and the templates to choose from
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderMailOverviewResponse {
    order: OrderResponse,

    /// Mail sent for the order, newest first
    histories: Vec<MailHistoryResponse>,

    templates: Vec<MailTemplateResponse>,
}

impl From<OrderMailOverview> for OrderMailOverviewResponse {
    fn from(overview: OrderMailOverview) -> Self {
        Self {
            order: overview.order.into(),
            histories: overview.histories.into_iter().map(Into::into).collect(),
            templates: overview.templates.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get an order's mail history and the available templates
#[utoipa::path(
    get,
    operation_id = "get_order_mail",
    tag = "Order Mail",
    path = "/api/v1/orders/{id}/mail",
    params(
        ("id" = i64, Path, description = "The order ID", example = 1),
    ),
    responses(
        (status = StatusCode::OK, description = "Order mail overview", body = OrderMailOverviewResponse),
        (status = StatusCode::NOT_FOUND, description = "Order not found", body = ErrorResponse),
    )
)]
pub async fn handler<S: OrderMailService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<OrderMailOverviewResponse>, ApiError> {
    let overview = state
        .order_mail
        .get_order_mail_overview(OrderId::new(id))
        .await?;

    Ok(Json(overview.into()))
}
