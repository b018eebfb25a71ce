//! Mail history repository module

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::orders::OrderId;

use super::{
    errors::{GetMailHistoryError, ListMailHistoriesError, RecordMailHistoryError},
    MailHistory, NewMailHistory,
};

/// Append-only store of sent order mail
#[async_trait]
pub trait MailHistoryRepository: Clone + Send + Sync + 'static {
    /// Append a history record. Existing records are never touched.
    async fn record_mail_history(
        &self,
        history: &NewMailHistory,
    ) -> Result<MailHistory, RecordMailHistoryError>;

    /// Get a history record by its ID
    async fn get_mail_history_by_id(&self, id: &Uuid) -> Result<MailHistory, GetMailHistoryError>;

    /// List the history of an order, newest first
    async fn list_mail_histories_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<MailHistory>, ListMailHistoriesError>;
}

#[cfg(test)]
mock! {
    pub MailHistoryRepository {}

    impl Clone for MailHistoryRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl MailHistoryRepository for MailHistoryRepository {
        async fn record_mail_history(&self, history: &NewMailHistory) -> Result<MailHistory, RecordMailHistoryError>;
        async fn get_mail_history_by_id(&self, id: &Uuid) -> Result<MailHistory, GetMailHistoryError>;
        async fn list_mail_histories_by_order(&self, order_id: OrderId) -> Result<Vec<MailHistory>, ListMailHistoriesError>;
    }
}
