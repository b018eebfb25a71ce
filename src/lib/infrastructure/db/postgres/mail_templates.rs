//! Postgres implementation of the MailTemplateRepository trait

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query_as, Error::RowNotFound, FromRow};
use uuid::Uuid;

use crate::{
    domain::mail_templates::{
        errors::{GetMailTemplateError, ListMailTemplatesError},
        MailTemplate, MailTemplateRepository,
    },
    infrastructure::db::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct MailTemplateRecord {
    id: i64,
    name: String,
    subject: String,
    header: String,
    footer: String,
    creator: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MailTemplateRecord> for MailTemplate {
    fn from(record: MailTemplateRecord) -> Self {
        MailTemplate {
            id: record.id,
            name: record.name,
            subject: record.subject,
            header: record.header,
            footer: record.footer,
            creator: record.creator,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl MailTemplateRepository for PostgresDatabase {
    #[mutants::skip]
    async fn get_mail_template_by_id(&self, id: i64) -> Result<MailTemplate, GetMailTemplateError> {
        Ok(query_as::<_, MailTemplateRecord>(
            r#"
            SELECT id, name, subject, header, footer, creator, created_at, updated_at
            FROM mail_templates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            RowNotFound => GetMailTemplateError::TemplateNotFound(id),
            _ => GetMailTemplateError::UnknownError(anyhow!("Unknown database error: {:?}", err)),
        })?
        .into())
    }

    #[mutants::skip]
    async fn list_mail_templates(&self) -> Result<Vec<MailTemplate>, ListMailTemplatesError> {
        let records = query_as::<_, MailTemplateRecord>(
            r#"
            SELECT id, name, subject, header, footer, creator, created_at, updated_at
            FROM mail_templates
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| anyhow!("Unknown database error: {:?}", err))?;

        Ok(records.into_iter().map(MailTemplate::from).collect())
    }
}
