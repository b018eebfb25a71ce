//! Error types for orders

use anyhow::anyhow;
use thiserror::Error;
use tracing::debug;

use crate::domain::orders::OrderId;

/// Errors that can occur when loading orders
#[derive(Debug, Error)]
pub enum GetOrdersError {
    /// One or more orders do not exist
    #[error("orders not found: {0:?}")]
    OrdersNotFound(Vec<OrderId>),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<sqlx::Error> for GetOrdersError {
    fn from(err: sqlx::Error) -> Self {
        debug!("sqlxError: {:?}", err);

        GetOrdersError::UnknownError(anyhow!("Unknown database error: {:?}", err))
    }
}
