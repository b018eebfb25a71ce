//! Mail template repository module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::mail_templates::{
    errors::{GetMailTemplateError, ListMailTemplatesError},
    MailTemplate,
};

/// Mail template store, read-only from the point of view of order mail
#[async_trait]
pub trait MailTemplateRepository: Clone + Send + Sync + 'static {
    /// Get a template by its ID
    async fn get_mail_template_by_id(&self, id: i64) -> Result<MailTemplate, GetMailTemplateError>;

    /// List every template, ordered by ID
    async fn list_mail_templates(&self) -> Result<Vec<MailTemplate>, ListMailTemplatesError>;
}

#[cfg(test)]
mock! {
    pub MailTemplateRepository {}

    impl Clone for MailTemplateRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl MailTemplateRepository for MailTemplateRepository {
        async fn get_mail_template_by_id(&self, id: i64) -> Result<MailTemplate, GetMailTemplateError>;
        async fn list_mail_templates(&self) -> Result<Vec<MailTemplate>, ListMailTemplatesError>;
    }
}
