//! Results of an order mail run

use thiserror::Error;

use crate::domain::{communication::mailer::MailerError, orders::OrderId};

use super::{errors::ComposeError, ComposedMessage};

/// Why a single order was not mailed
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DispatchFailureReason {
    /// The order has no customer email
    #[error("order has no customer email address")]
    MissingRecipient,

    /// The transport rejected the recipient address
    #[error("invalid recipient address")]
    InvalidRecipient,

    /// The transport rejected the message
    #[error("rejected by mail transport: {0}")]
    Rejected(String),

    /// The transport did not answer within the send timeout
    #[error("timed out while sending")]
    TimedOut,

    /// Anything else
    #[error("{0}")]
    Unknown(String),
}

impl From<ComposeError> for DispatchFailureReason {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::MissingRecipient(_) => DispatchFailureReason::MissingRecipient,
            ComposeError::RenderError(err) => DispatchFailureReason::Unknown(err.to_string()),
        }
    }
}

impl From<MailerError> for DispatchFailureReason {
    fn from(err: MailerError) -> Self {
        match err {
            MailerError::Rejected(reason) => DispatchFailureReason::Rejected(reason),
            MailerError::InvalidEmail => DispatchFailureReason::InvalidRecipient,
            MailerError::UnknownError(err) => DispatchFailureReason::Unknown(err.to_string()),
        }
    }
}

/// An order that could not be mailed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchFailure {
    /// The order
    pub order_id: OrderId,

    /// Why it failed
    pub reason: DispatchFailureReason,
}

/// Summary of a sending run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of messages accepted by the transport
    pub sent_count: usize,

    /// Orders that were skipped, in send order
    pub failures: Vec<DispatchFailure>,

    /// Orders that were sent but whose mail history could not be written
    pub unrecorded_order_ids: Vec<OrderId>,
}

impl DispatchReport {
    /// IDs of the orders that were not mailed
    pub fn failed_order_ids(&self) -> Vec<OrderId> {
        self.failures.iter().map(|failure| failure.order_id).collect()
    }

    /// Whether every order was mailed and has a history record
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.unrecorded_order_ids.is_empty()
    }
}

/// What a run produced, depending on its send mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Messages composed for review, nothing was sent
    Previewed(Vec<ComposedMessage>),

    /// Messages were sent
    Dispatched(DispatchReport),
}
