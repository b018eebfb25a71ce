//! Error types for mail templates

use thiserror::Error;

/// Errors that can occur when getting a mail template
#[derive(Debug, Error)]
pub enum GetMailTemplateError {
    /// Template not found
    #[error("mail template with id \"{0}\" not found")]
    TemplateNotFound(i64),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when listing mail templates
#[derive(Debug, Error)]
pub enum ListMailTemplatesError {
    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
