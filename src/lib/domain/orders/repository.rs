//! Order repository module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::orders::{errors::GetOrdersError, Order, OrderId};

/// Order repository
#[async_trait]
pub trait OrderRepository: Clone + Send + Sync + 'static {
    /// Load every order in `ids`.
    ///
    /// Fails with [`GetOrdersError::OrdersNotFound`] naming the missing IDs when any of them
    /// does not exist. The returned orders are not guaranteed to follow the order of `ids`.
    async fn get_orders_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, GetOrdersError>;
}

#[cfg(test)]
mock! {
    pub OrderRepository {}

    impl Clone for OrderRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl OrderRepository for OrderRepository {
        async fn get_orders_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, GetOrdersError>;
    }
}
