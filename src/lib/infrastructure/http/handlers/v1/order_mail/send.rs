//! Send order mail

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::{
    domain::{
        order_mail::{MailCompositionContext, OrderMailService, TargetOrderSet},
        orders::OrderId,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

use super::{BulkComposeMailBody, ComposeMailBody, DispatchReportResponse};

/// Send the mail for one order and record it in the order's mail history
#[utoipa::path(
    post,
    operation_id = "send_order_mail",
    tag = "Order Mail",
    path = "/api/v1/orders/{id}/mail/send",
    params(
        ("id" = i64, Path, description = "The order ID", example = 1),
    ),
    request_body = ComposeMailBody,
    responses(
        (status = StatusCode::OK, description = "Send report, failures are listed per order", body = DispatchReportResponse),
        (status = StatusCode::NOT_FOUND, description = "Order or template not found", body = ErrorResponse),
    )
)]
pub async fn handler<S: OrderMailService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    request: Result<Json<ComposeMailBody>, JsonRejection>,
) -> Result<Json<DispatchReportResponse>, ApiError> {
    let Json(body) = request?;

    let context = body.into_context(TargetOrderSet::single(OrderId::new(id)));

    let report = state.order_mail.dispatch(&context).await?;

    Ok(Json(report.into()))
}

/// Send the mail for several orders and record each one sent.
///
/// An order that cannot be mailed does not stop the others.
#[utoipa::path(
    post,
    operation_id = "send_bulk_order_mail",
    tag = "Order Mail",
    path = "/api/v1/orders/mail/send",
    request_body = BulkComposeMailBody,
    responses(
        (status = StatusCode::OK, description = "Send report, failures are listed per order", body = DispatchReportResponse),
        (status = StatusCode::NOT_FOUND, description = "Orders or template not found", body = ErrorResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid order list", body = ErrorResponse),
    )
)]
pub async fn bulk_handler<S: OrderMailService>(
    State(state): State<AppState<S>>,
    request: Result<Json<BulkComposeMailBody>, JsonRejection>,
) -> Result<Json<DispatchReportResponse>, ApiError> {
    let Json(body) = request?;

    let context = MailCompositionContext::try_from(body)?;

    let report = state.order_mail.dispatch(&context).await?;

    Ok(Json(report.into()))
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
            order_mail::{
                errors::OrderMailError, tests::MockOrderMailService, DispatchFailure,
                DispatchFailureReason, DispatchReport,
            },
            orders::OrderId,
        },
        infrastructure::http::{
            errors::ErrorResponse, handlers::v1::order_mail::DispatchReportResponse, router,
            state::tests::test_state,
        },
    };

    #[tokio::test]
    async fn test_send_single_order() -> TestResult {
        let creator = Uuid::now_v7();
        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_dispatch()
            .withf(move |context| {
                context.orders.ids() == [OrderId::new(5)]
                    && context.creator == creator
                    && context.overrides.footer == "See you soon"
            })
            .times(1)
            .returning(|_| {
                Ok(DispatchReport {
                    sent_count: 1,
                    ..Default::default()
                })
            });

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .post("/api/v1/orders/5/mail/send")
            .json(&json!({
                "template_id": 1,
                "footer": "See you soon",
                "creator": creator,
            }))
            .await;

        response.assert_status_ok();

        let json = response.json::<DispatchReportResponse>();

        assert_eq!(json.sent_count, 1);
        assert!(json.failed_order_ids.is_empty());
        assert!(json.unrecorded_order_ids.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_send_reports_orders_missing_from_history() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail.expect_dispatch().times(1).returning(|_| {
            Ok(DispatchReport {
                sent_count: 2,
                unrecorded_order_ids: vec![OrderId::new(1)],
                ..Default::default()
            })
        });

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .post("/api/v1/orders/mail/send")
            .json(&json!({
                "ids": "1,2",
                "template_id": 1,
                "creator": Uuid::now_v7(),
            }))
            .await;

        response.assert_status_ok();

        let json = response.json::<DispatchReportResponse>();

        assert_eq!(json.sent_count, 2);
        assert!(json.failed_order_ids.is_empty());
        assert_eq!(json.unrecorded_order_ids, vec![1]);

        Ok(())
    }

    #[tokio::test]
    async fn test_send_bulk_reports_partial_failure() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_dispatch()
            .withf(|context| context.orders.len() == 3)
            .times(1)
            .returning(|_| {
                Ok(DispatchReport {
                    sent_count: 2,
                    failures: vec![DispatchFailure {
                        order_id: OrderId::new(2),
                        reason: DispatchFailureReason::MissingRecipient,
                    }],
                    ..Default::default()
                })
            });

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .post("/api/v1/orders/mail/send")
            .json(&json!({
                "ids": "1,2,3",
                "template_id": 1,
                "subject": "Hello",
                "creator": Uuid::now_v7(),
            }))
            .await;

        response.assert_status_ok();

        let json = response.json::<DispatchReportResponse>();

        assert_eq!(json.sent_count, 2);
        assert_eq!(json.failed_order_ids, vec![2]);
        assert_eq!(
            json.failures[0].reason,
            "order has no customer email address"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_send_bulk_with_unknown_order_sends_nothing() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_dispatch()
            .times(1)
            .returning(|_| Err(OrderMailError::OrdersNotFound(vec![OrderId::new(999)])));

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .post("/api/v1/orders/mail/send")
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
    async fn test_send_with_unknown_template() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_dispatch()
            .returning(|_| Err(OrderMailError::TemplateNotFound(42)));

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .post("/api/v1/orders/1/mail/send")
            .json(&json!({
                "template_id": 42,
                "creator": Uuid::now_v7(),
            }))
            .expect_failure()
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<ErrorResponse>().error,
            "mail template with id \"42\" not found"
        );

        Ok(())
    }
}
