//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::{errors::ErrorResponse, handlers::v1::*};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Order Mail"),
    paths(
        order_mail::list_templates::handler,
        order_mail::index::handler,
        order_mail::preview::handler,
        order_mail::preview::bulk_handler,
        order_mail::send::handler,
        order_mail::send::bulk_handler,
        order_mail::view_history::handler,
        uptime::handler
    ),
    components(schemas(
        order_mail::ComposeMailBody,
        order_mail::BulkComposeMailBody,
        order_mail::ComposedMessageResponse,
        order_mail::DispatchFailureResponse,
        order_mail::DispatchReportResponse,
        order_mail::MailTemplateResponse,
        order_mail::MailHistoryResponse,
        order_mail::OrderResponse,
        order_mail::index::OrderMailOverviewResponse,
        order_mail::preview::PreviewResponse,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;
