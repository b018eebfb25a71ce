//! List mail templates

use axum::{extract::State, Json};

use crate::{
    domain::order_mail::OrderMailService,
    infrastructure::http::{errors::ApiError, state::AppState},
};

use super::MailTemplateResponse;

/// List the templates order mail can be based on
#[utoipa::path(
    get,
    operation_id = "list_mail_templates",
    tag = "Order Mail",
    path = "/api/v1/mail-templates",
    responses(
        (status = StatusCode::OK, description = "Mail templates ordered by ID", body = [MailTemplateResponse]),
    )
)]
pub async fn handler<S: OrderMailService>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<MailTemplateResponse>>, ApiError> {
    let templates = state.order_mail.list_mail_templates().await?;

    Ok(Json(templates.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::{
        domain::{
            mail_templates::{tests::mail_template_fixture, MailTemplate},
            order_mail::{errors::OrderMailError, tests::MockOrderMailService},
        },
        infrastructure::http::{
            handlers::v1::order_mail::MailTemplateResponse, router, state::tests::test_state,
        },
    };

    #[tokio::test]
    async fn test_list_mail_templates() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail.expect_list_mail_templates().times(1).returning(|| {
            Ok(vec![
                mail_template_fixture(),
                MailTemplate {
                    id: 2,
                    name: "Shipping notice".to_string(),
                    ..mail_template_fixture()
                },
            ])
        });

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .get("/api/v1/mail-templates")
            .await;

        response.assert_status_ok();

        let json = response.json::<Vec<MailTemplateResponse>>();

        assert_eq!(json.len(), 2);
        assert_eq!(json[1].name, "Shipping notice");

        Ok(())
    }

    #[tokio::test]
    async fn test_list_mail_templates_hides_unknown_errors() -> TestResult {
        let mut order_mail = MockOrderMailService::new();

        order_mail
            .expect_list_mail_templates()
            .returning(|| Err(OrderMailError::UnknownError(anyhow!("pool timed out"))));

        let response = TestServer::new(router(test_state(Some(order_mail))))?
            .get("/api/v1/mail-templates")
            .expect_failure()
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.text().contains("pool timed out"));

        Ok(())
    }
}
