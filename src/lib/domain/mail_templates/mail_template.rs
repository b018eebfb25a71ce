//! Mail template model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reusable subject, header and footer text authored by an administrator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailTemplate {
    /// Template ID
    pub id: i64,

    /// Display name shown when picking a template
    pub name: String,

    /// Default subject, without the shop name prefix
    pub subject: String,

    /// Default text placed above the order details
    pub header: String,

    /// Default text placed below the order details
    pub footer: String,

    /// ID of the member who created the template
    pub creator: Uuid,

    /// Template created at date in UTC
    pub created_at: DateTime<Utc>,

    /// Template last updated at date in UTC
    pub updated_at: DateTime<Utc>,
}
