//! Email message

use crate::domain::communication::email_addresses::EmailAddress;

/// Outbound plain text email message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The recipient of the email
    pub to: EmailAddress,

    /// The sender of the email, falls back to the transport's configured sender
    pub from: Option<EmailAddress>,

    /// The subject of the email
    pub subject: String,

    /// The plain text body of the email
    pub body: String,
}
