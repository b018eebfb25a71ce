//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::order_mail::{
    errors::{GetMailHistoryError, OrderMailError},
    TargetOrderSetError,
};

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// The error message
    #[schema(example = "Internal server error")]
    pub error: String,
}

/// An error raised in the API
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApiError {
    /// The status code
    #[schema(example = 500, value_type = u16)]
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,

    /// The error message
    #[schema(example = "Internal server error")]
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new not found error
    pub fn new_404(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create a new unprocessable entity error
    pub fn new_422(message: &str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        unknown_error(err)
    }
}

impl From<TargetOrderSetError> for ApiError {
    fn from(err: TargetOrderSetError) -> Self {
        ApiError::new_422(&err.to_string())
    }
}

impl From<OrderMailError> for ApiError {
    fn from(err: OrderMailError) -> Self {
        match err {
            OrderMailError::MissingRecipient(_) => ApiError::new_422(&err.to_string()),
            OrderMailError::TemplateNotFound(_) | OrderMailError::OrdersNotFound(_) => {
                ApiError::new_404(&err.to_string())
            }
            OrderMailError::UnknownError(err) => unknown_error(err),
        }
    }
}

impl From<GetMailHistoryError> for ApiError {
    fn from(err: GetMailHistoryError) -> Self {
        match err {
            GetMailHistoryError::MailHistoryNotFound(_) => ApiError::new_404(&err.to_string()),
            GetMailHistoryError::UnknownError(err) => unknown_error(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), &rejection.body_text())
    }
}

fn unknown_error(err: anyhow::Error) -> ApiError {
    error!("unhandled error: {err:?}");

    ApiError::new_500("An unknown error occurred, please try again")
}
