//! Mail history model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::orders::OrderId;

use super::ComposedMessage;

/// Audit record of a mail sent for an order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailHistory {
    /// Mail history UUID
    pub id: Uuid,

    /// The order the mail was sent for
    pub order_id: OrderId,

    /// Subject as sent
    pub subject: String,

    /// Body as sent
    pub body: String,

    /// Date the mail was sent in UTC
    pub sent_at: DateTime<Utc>,

    /// ID of the member who sent the mail
    pub creator: Uuid,
}

/// Mail history about to be recorded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMailHistory {
    id: Uuid,
    order_id: OrderId,
    subject: String,
    body: String,
    sent_at: DateTime<Utc>,
    creator: Uuid,
}

impl NewMailHistory {
    /// Record `message` as sent now by `creator`
    pub fn new(message: &ComposedMessage, creator: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            order_id: message.order_id,
            subject: message.subject.clone(),
            body: message.body.clone(),
            sent_at: Utc::now(),
            creator,
        }
    }

    /// Get the new history's ID
    pub fn id(&self) -> &Uuid {
        &self.id
    }

    /// Get the order the mail was sent for
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Get the subject as sent
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Get the body as sent
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Get the send date
    pub fn sent_at(&self) -> &DateTime<Utc> {
        &self.sent_at
    }

    /// Get the sending member's ID
    pub fn creator(&self) -> &Uuid {
        &self.creator
    }
}

impl From<NewMailHistory> for MailHistory {
    fn from(history: NewMailHistory) -> Self {
        Self {
            id: history.id,
            order_id: history.order_id,
            subject: history.subject,
            body: history.body,
            sent_at: history.sent_at,
            creator: history.creator,
        }
    }
}
