//! Error types for order mail

use anyhow::anyhow;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    mail_templates::errors::{GetMailTemplateError, ListMailTemplatesError},
    orders::{errors::GetOrdersError, OrderId},
};

/// Errors that can occur when composing a message for one order
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The order has no customer email to send to
    #[error("order {0} has no customer email address")]
    MissingRecipient(OrderId),

    /// The order details could not be rendered
    #[error("could not render order details: {0}")]
    RenderError(#[from] askama::Error),
}

/// Errors that abort an order mail run before anything is sent
#[derive(Debug, Error)]
pub enum OrderMailError {
    /// An order has no customer email address
    #[error("order {0} has no customer email address")]
    MissingRecipient(OrderId),

    /// The mail template does not exist
    #[error("mail template with id \"{0}\" not found")]
    TemplateNotFound(i64),

    /// One or more orders do not exist
    #[error("orders not found: {}", join_ids(.0))]
    OrdersNotFound(Vec<OrderId>),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

fn join_ids(ids: &[OrderId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur when recording a mail history
#[derive(Debug, Error)]
pub enum RecordMailHistoryError {
    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when getting a mail history
#[derive(Debug, Error)]
pub enum GetMailHistoryError {
    /// Mail history not found
    #[error("mail history with id \"{0}\" not found")]
    MailHistoryNotFound(Uuid),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when listing the mail histories of an order
#[derive(Debug, Error)]
pub enum ListMailHistoriesError {
    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<ComposeError> for OrderMailError {
    fn from(err: ComposeError) -> Self {
        debug!("ComposeError -> OrderMailError");

        match err {
            ComposeError::MissingRecipient(id) => OrderMailError::MissingRecipient(id),
            ComposeError::RenderError(err) => {
                OrderMailError::UnknownError(anyhow!("could not render order details: {err}"))
            }
        }
    }
}

impl From<GetOrdersError> for OrderMailError {
    fn from(err: GetOrdersError) -> Self {
        debug!("GetOrdersError -> OrderMailError");

        match err {
            GetOrdersError::OrdersNotFound(ids) => OrderMailError::OrdersNotFound(ids),
            GetOrdersError::UnknownError(e) => OrderMailError::UnknownError(e),
        }
    }
}

impl From<GetMailTemplateError> for OrderMailError {
    fn from(err: GetMailTemplateError) -> Self {
        debug!("GetMailTemplateError -> OrderMailError");

        match err {
            GetMailTemplateError::TemplateNotFound(id) => OrderMailError::TemplateNotFound(id),
            GetMailTemplateError::UnknownError(e) => OrderMailError::UnknownError(e),
        }
    }
}

impl From<ListMailTemplatesError> for OrderMailError {
    fn from(err: ListMailTemplatesError) -> Self {
        match err {
            ListMailTemplatesError::UnknownError(e) => OrderMailError::UnknownError(e),
        }
    }
}

impl From<ListMailHistoriesError> for OrderMailError {
    fn from(err: ListMailHistoriesError) -> Self {
        match err {
            ListMailHistoriesError::UnknownError(e) => OrderMailError::UnknownError(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_not_found_lists_every_id() {
        let err = OrderMailError::OrdersNotFound(vec![OrderId::new(4), OrderId::new(999)]);

        assert_eq!(err.to_string(), "orders not found: 4, 999");
    }
}
