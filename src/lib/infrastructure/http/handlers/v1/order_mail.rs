//! Order mail handlers and the bodies they share

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        mail_templates::MailTemplate,
        order_mail::{
            ComposedMessage, CompositionOverride, DispatchReport, MailCompositionContext,
            MailHistory, TargetOrderSet,
        },
        orders::{Order, OrderId},
    },
    infrastructure::http::errors::ApiError,
};

pub mod index;
pub mod list_templates;
pub mod preview;
pub mod send;
pub mod view_history;

/// Mail settings for a single order
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ComposeMailBody {
    /// ID of the template to start from
    #[schema(example = 1)]
    pub template_id: i64,

    /// Subject override, the template's subject is used when blank
    #[serde(default)]
    #[schema(example = "Your order has shipped")]
    pub subject: String,

    /// Header override, the template's header is used when blank
    #[serde(default)]
    pub header: String,

    /// Footer override, the template's footer is used when blank
    #[serde(default)]
    pub footer: String,

    /// ID of the member sending the mail
    pub creator: Uuid,
}

impl ComposeMailBody {
    fn into_context(self, orders: TargetOrderSet) -> MailCompositionContext {
        MailCompositionContext {
            template_id: self.template_id,
            overrides: CompositionOverride {
                subject: self.subject,
                header: self.header,
                footer: self.footer,
            },
            orders,
            creator: self.creator,
        }
    }
}

/// Mail settings for several orders at once
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkComposeMailBody {
    /// Comma-separated order IDs, repeated IDs are mailed once
    #[schema(example = "1,2,3")]
    pub ids: String,

    /// ID of the template to start from
    #[schema(example = 1)]
    pub template_id: i64,

    /// Subject override, the template's subject is used when blank
    #[serde(default)]
    pub subject: String,

    /// Header override, the template's header is used when blank
    #[serde(default)]
    pub header: String,

    /// Footer override, the template's footer is used when blank
    #[serde(default)]
    pub footer: String,

    /// ID of the member sending the mail
    pub creator: Uuid,
}

impl TryFrom<BulkComposeMailBody> for MailCompositionContext {
    type Error = ApiError;

    fn try_from(body: BulkComposeMailBody) -> Result<Self, Self::Error> {
        let orders: TargetOrderSet = body.ids.parse()?;

        Ok(ComposeMailBody {
            template_id: body.template_id,
            subject: body.subject,
            header: body.header,
            footer: body.footer,
            creator: body.creator,
        }
        .into_context(orders))
    }
}

/// A composed message
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ComposedMessageResponse {
    /// The order the message is for
    pub order_id: i64,

    /// Recipient address
    #[schema(example = "customer@example.com")]
    pub to: String,

    /// Subject with the shop name prefix
    #[schema(example = "[ShopX] Your order has shipped")]
    pub subject: String,

    /// Plain text body
    pub body: String,
}

impl From<ComposedMessage> for ComposedMessageResponse {
    fn from(message: ComposedMessage) -> Self {
        Self {
            order_id: message.order_id.as_i64(),
            to: message.to.to_string(),
            subject: message.subject,
            body: message.body,
        }
    }
}

/// An order that was not mailed
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DispatchFailureResponse {
    /// The order
    pub order_id: i64,

    /// Why it was not mailed
    #[schema(example = "order has no customer email address")]
    pub reason: String,
}

/// Result of sending order mail
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DispatchReportResponse {
    /// Number of messages sent
    #[schema(example = 5)]
    pub sent_count: usize,

    /// IDs of the orders that were not mailed
    pub failed_order_ids: Vec<i64>,

    /// Details for every order that was not mailed
    pub failures: Vec<DispatchFailureResponse>,

    /// IDs of the orders that were mailed but are missing from the mail history
    pub unrecorded_order_ids: Vec<i64>,
}

impl From<DispatchReport> for DispatchReportResponse {
    fn from(report: DispatchReport) -> Self {
        Self {
            sent_count: report.sent_count,
            failed_order_ids: report
                .failed_order_ids()
                .iter()
                .map(OrderId::as_i64)
                .collect(),
            failures: report
                .failures
                .into_iter()
                .map(|failure| DispatchFailureResponse {
                    order_id: failure.order_id.as_i64(),
                    reason: failure.reason.to_string(),
                })
                .collect(),
            unrecorded_order_ids: report
                .unrecorded_order_ids
                .iter()
                .map(OrderId::as_i64)
                .collect(),
        }
    }
}

/// A mail template
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MailTemplateResponse {
    #[schema(example = 1)]
    id: i64,

    #[schema(example = "Shipping notice")]
    name: String,

    subject: String,
    header: String,
    footer: String,
    updated_at: DateTime<Utc>,
}

impl From<MailTemplate> for MailTemplateResponse {
    fn from(template: MailTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name,
            subject: template.subject,
            header: template.header,
            footer: template.footer,
            updated_at: template.updated_at,
        }
    }
}

/// A sent mail
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MailHistoryResponse {
    id: Uuid,
    order_id: i64,
    subject: String,
    body: String,
    sent_at: DateTime<Utc>,
    creator: Uuid,
}

impl From<MailHistory> for MailHistoryResponse {
    fn from(history: MailHistory) -> Self {
        Self {
            id: history.id,
            order_id: history.order_id.as_i64(),
            subject: history.subject,
            body: history.body,
            sent_at: history.sent_at,
            creator: history.creator,
        }
    }
}

/// Order summary shown next to its mail
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    id: i64,

    #[schema(example = "000001")]
    order_no: String,

    customer_name: String,
    email: Option<String>,
    ordered_at: DateTime<Utc>,
    payment_total: i64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.as_i64(),
            order_no: order.order_no,
            customer_name: order.customer_name,
            email: order.email.map(String::from),
            ordered_at: order.ordered_at,
            payment_total: order.payment_total,
        }
    }
}
