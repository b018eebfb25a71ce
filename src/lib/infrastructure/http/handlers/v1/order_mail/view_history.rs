//! View a sent mail

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    domain::order_mail::OrderMailService,
    infrastructure::http::{errors::ApiError, state::AppState},
};

use super::MailHistoryResponse;

/// Get a sent mail by its history ID
#[utoipa::path(
    get,
    operation_id = "get_mail_history",
    tag = "Order Mail",
    path = "/api/v1/mail-histories/{id}",
    params(
        ("id" = Uuid, Path, description = "The mail history UUID", example = "01919a3c-6f2e-7cc0-a0d7-5b1d0e6c2f11"),
    ),
    responses(
        (status = StatusCode::OK, description = "Mail history found", body = MailHistoryResponse),
        (status = StatusCode::NOT_FOUND, description = "Mail history not found", body = ErrorResponse),
    )
)]
pub async fn handler<S: OrderMailService>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MailHistoryResponse>, ApiError> {
    let history = state.order_mail.get_mail_history(&id).await?;

    Ok(Json(history.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::Utc;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::{
            order_mail::{errors::GetMailHistoryError, tests::MockOrderMailService, MailHistory},
            orders::OrderId,
        },
        infrastructure::http::{
            errors::ErrorResponse, handlers::v1::order_mail::MailHistoryResponse, router,
            state::tests::test_state,
        },
    };

    #[tokio::test]
    async fn test_view_mail_history() -> TestResult {
        let history = MailHistory {
            id: Uuid::now_v7(),
            order_id: OrderId::new(8),
            subject: "[ShopX] Hello".to_string(),
            body: "Thank you\n\nOrder No.: 000008".to_string(),
            sent_at: Utc::now(),
            creator: Uuid::now_v7(),
        };
        let id = history.id;

        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_get_mail_history()
            .withf(move |requested| *requested == id)
            .times(1)
            .returning(move |_| Ok(history.clone()));

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .get(&format!("/api/v1/mail-histories/{id}"))
            .await;

        response.assert_status_ok();

        let json = response.json::<MailHistoryResponse>();

        assert_eq!(json.id, id);
        assert_eq!(json.order_id, 8);
        assert_eq!(json.subject, "[ShopX] Hello");

        Ok(())
    }

    #[tokio::test]
    async fn test_view_mail_history_not_found() -> TestResult {
        let id = Uuid::now_v7();
        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_get_mail_history()
            .returning(|id| Err(GetMailHistoryError::MailHistoryNotFound(*id)));

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .get(&format!("/api/v1/mail-histories/{id}"))
            .expect_failure()
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<ErrorResponse>().error,
            format!("mail history with id \"{id}\" not found")
        );

        Ok(())
    }
}
