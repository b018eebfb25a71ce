//! Postgres implementation of the MailHistoryRepository trait

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query_as, Error::RowNotFound, FromRow};
use uuid::Uuid;

use crate::{
    domain::{
        order_mail::{
            errors::{GetMailHistoryError, ListMailHistoriesError, RecordMailHistoryError},
            MailHistory, MailHistoryRepository, NewMailHistory,
        },
        orders::OrderId,
    },
    infrastructure::db::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct MailHistoryRecord {
    id: Uuid,
    order_id: i64,
    subject: String,
    body: String,
    sent_at: DateTime<Utc>,
    creator: Uuid,
}

impl From<MailHistoryRecord> for MailHistory {
    fn from(record: MailHistoryRecord) -> Self {
        MailHistory {
            id: record.id,
            order_id: OrderId::new(record.order_id),
            subject: record.subject,
            body: record.body,
            sent_at: record.sent_at,
            creator: record.creator,
        }
    }
}

#[async_trait]
impl MailHistoryRepository for PostgresDatabase {
    #[mutants::skip]
    async fn record_mail_history(
        &self,
        history: &NewMailHistory,
    ) -> Result<MailHistory, RecordMailHistoryError> {
        Ok(query_as::<_, MailHistoryRecord>(
            r#"
            INSERT INTO mail_histories (id, order_id, subject, body, sent_at, creator)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, order_id, subject, body, sent_at, creator
            "#,
        )
        .bind(history.id())
        .bind(history.order_id().as_i64())
        .bind(history.subject())
        .bind(history.body())
        .bind(history.sent_at())
        .bind(history.creator())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| anyhow!("Unknown database error: {:?}", err))?
        .into())
    }

    #[mutants::skip]
    async fn get_mail_history_by_id(&self, id: &Uuid) -> Result<MailHistory, GetMailHistoryError> {
        Ok(query_as::<_, MailHistoryRecord>(
            r#"
            SELECT id, order_id, subject, body, sent_at, creator
            FROM mail_histories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            RowNotFound => GetMailHistoryError::MailHistoryNotFound(*id),
            _ => GetMailHistoryError::UnknownError(anyhow!("Unknown database error: {:?}", err)),
        })?
        .into())
    }

    #[mutants::skip]
    async fn list_mail_histories_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<MailHistory>, ListMailHistoriesError> {
        let records = query_as::<_, MailHistoryRecord>(
            r#"
            SELECT id, order_id, subject, body, sent_at, creator
            FROM mail_histories
            WHERE order_id = $1
            ORDER BY sent_at DESC, id DESC
            "#,
        )
        .bind(order_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|err| anyhow!("Unknown database error: {:?}", err))?;

        Ok(records.into_iter().map(MailHistory::from).collect())
    }
}
