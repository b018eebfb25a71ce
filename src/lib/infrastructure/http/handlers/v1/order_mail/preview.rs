//! Preview order mail

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        order_mail::{MailCompositionContext, OrderMailService, TargetOrderSet},
        orders::OrderId,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

use super::{BulkComposeMailBody, ComposeMailBody, ComposedMessageResponse};

/// Messages as they would be sent
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PreviewResponse {
    /// One message per order, in the order requested
    pub messages: Vec<ComposedMessageResponse>,
}

async fn preview<S: OrderMailService>(
    state: &AppState<S>,
    context: &MailCompositionContext,
) -> Result<Json<PreviewResponse>, ApiError> {
    let messages = state.order_mail.preview(context).await?;

    Ok(Json(PreviewResponse {
        messages: messages.into_iter().map(Into::into).collect(),
    }))
}

/// Preview the mail for one order. Nothing is sent or recorded.
#[utoipa::path(
    post,
    operation_id = "preview_order_mail",
    tag = "Order Mail",
    path = "/api/v1/orders/{id}/mail/preview",
    params(
        ("id" = i64, Path, description = "The order ID", example = 1),
    ),
    request_body = ComposeMailBody,
    responses(
        (status = StatusCode::OK, description = "Composed message", body = PreviewResponse),
        (status = StatusCode::NOT_FOUND, description = "Order or template not found", body = ErrorResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Order has no customer email", body = ErrorResponse),
    )
)]
pub async fn handler<S: OrderMailService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    request: Result<Json<ComposeMailBody>, JsonRejection>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let Json(body) = request?;

    let context = body.into_context(TargetOrderSet::single(OrderId::new(id)));

    preview(&state, &context).await
}

/// Preview the mail for several orders. Nothing is sent or recorded.
#[utoipa::path(
    post,
    operation_id = "preview_bulk_order_mail",
    tag = "Order Mail",
    path = "/api/v1/orders/mail/preview",
    request_body = BulkComposeMailBody,
    responses(
        (status = StatusCode::OK, description = "Composed messages", body = PreviewResponse),
        (status = StatusCode::NOT_FOUND, description = "Orders or template not found", body = ErrorResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid order list, or an order has no customer email", body = ErrorResponse),
    )
)]
pub async fn bulk_handler<S: OrderMailService>(
    State(state): State<AppState<S>>,
    request: Result<Json<BulkComposeMailBody>, JsonRejection>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let Json(body) = request?;

    let context = MailCompositionContext::try_from(body)?;

    preview(&state, &context).await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::{
            communication::email_addresses::EmailAddress,
            order_mail::{errors::OrderMailError, tests::MockOrderMailService, ComposedMessage},
            orders::OrderId,
        },
        infrastructure::http::{errors::ErrorResponse, router, state::tests::test_state},
    };

    use super::PreviewResponse;

    fn composed(id: i64) -> ComposedMessage {
        ComposedMessage {
            order_id: OrderId::new(id),
            to: EmailAddress::new_unchecked(&format!("customer{id}@example.com")),
            subject: "[ShopX] Hello".to_string(),
            body: "Header\n\nDetails\n\nFooter".to_string(),
        }
    }

    #[tokio::test]
    async fn test_preview_single_order() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_preview()
            .withf(|context| {
                context.template_id == 1
                    && context.orders.ids() == [OrderId::new(7)]
                    && context.overrides.subject == "Hello"
                    && context.overrides.header.is_empty()
            })
            .times(1)
            .returning(|_| Ok(vec![composed(7)]));

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .post("/api/v1/orders/7/mail/preview")
            .json(&json!({
                "template_id": 1,
                "subject": "Hello",
                "creator": Uuid::now_v7(),
            }))
            .await;

        response.assert_status_ok();

        let json = response.json::<PreviewResponse>();

        assert_eq!(json.messages.len(), 1);
        assert_eq!(json.messages[0].order_id, 7);
        assert_eq!(json.messages[0].to, "customer7@example.com");
        assert_eq!(json.messages[0].subject, "[ShopX] Hello");

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_bulk_parses_and_deduplicates_ids() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_preview()
            .withf(|context| {
                context.orders.ids() == [OrderId::new(3), OrderId::new(1), OrderId::new(2)]
            })
            .times(1)
            .returning(|_| Ok(vec![composed(3), composed(1), composed(2)]));

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .post("/api/v1/orders/mail/preview")
            .json(&json!({
                "ids": "3, 1,2,3,",
                "template_id": 1,
                "creator": Uuid::now_v7(),
            }))
            .await;

        response.assert_status_ok();

        let order_ids: Vec<i64> = response
            .json::<PreviewResponse>()
            .messages
            .iter()
            .map(|message| message.order_id)
            .collect();

        assert_eq!(order_ids, vec![3, 1, 2]);

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_bulk_rejects_invalid_ids() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail.expect_preview().never();

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .post("/api/v1/orders/mail/preview")
            .json(&json!({
                "ids": "1,two",
                "template_id": 1,
                "creator": Uuid::now_v7(),
            }))
            .expect_failure()
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.json::<ErrorResponse>().error,
            "\"two\" is not a valid order id"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_bulk_rejects_empty_ids() -> TestResult {
        let response = TestServer::new(router(test_state(None)))?
            .post("/api/v1/orders/mail/preview")
            .json(&json!({
                "ids": " , ",
                "template_id": 1,
                "creator": Uuid::now_v7(),
            }))
            .expect_failure()
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_missing_order_is_not_found() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_preview()
            .returning(|_| Err(OrderMailError::OrdersNotFound(vec![OrderId::new(999)])));

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .post("/api/v1/orders/mail/preview")
            .json(&json!({
                "ids": "1,2,999",
                "template_id": 1,
                "creator": Uuid::now_v7(),
            }))
            .expect_failure()
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<ErrorResponse>().error,
            "orders not found: 999"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_missing_recipient_is_unprocessable() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_preview()
            .returning(|_| Err(OrderMailError::MissingRecipient(OrderId::new(4))));

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .post("/api/v1/orders/4/mail/preview")
            .json(&json!({
                "template_id": 1,
                "creator": Uuid::now_v7(),
            }))
            .expect_failure()
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_rejects_malformed_body() -> TestResult {
        let response = TestServer::new(router(test_state(None)))?
            .post("/api/v1/orders/4/mail/preview")
            .json(&json!({ "subject": "Hello" }))
            .expect_failure()
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        Ok(())
    }
}
