//! What to send, and to which orders

use std::{collections::HashSet, str::FromStr};

use thiserror::Error;
use uuid::Uuid;

use crate::domain::orders::OrderId;

/// Errors that can occur when building a [`TargetOrderSet`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetOrderSetError {
    /// No order IDs were given
    #[error("at least one order must be selected")]
    Empty,

    /// A value in a comma-separated list is not an order ID
    #[error("\"{0}\" is not a valid order id")]
    InvalidOrderId(String),
}

/// Non-empty, duplicate-free, ordered set of orders to mail
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetOrderSet(Vec<OrderId>);

impl TargetOrderSet {
    /// Build a set from `ids`, dropping repeated IDs while keeping first-seen order
    pub fn new(ids: impl IntoIterator<Item = OrderId>) -> Result<Self, TargetOrderSetError> {
        let mut seen = HashSet::new();

        let ids: Vec<OrderId> = ids.into_iter().filter(|id| seen.insert(*id)).collect();

        if ids.is_empty() {
            return Err(TargetOrderSetError::Empty);
        }

        Ok(Self(ids))
    }

    /// A set holding one order
    pub fn single(id: OrderId) -> Self {
        Self(vec![id])
    }

    /// The IDs in send order
    pub fn ids(&self) -> &[OrderId] {
        &self.0
    }

    /// Iterate the IDs in send order
    pub fn iter(&self) -> impl Iterator<Item = &OrderId> {
        self.0.iter()
    }

    /// Number of orders in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`, a target set cannot be empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parses a comma-separated list such as `"1,2,3"`. Blank entries are ignored.
impl FromStr for TargetOrderSet {
    type Err = TargetOrderSetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<OrderId>()
                    .map_err(|_| TargetOrderSetError::InvalidOrderId(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(ids)
    }
}

/// Per-send edits layered over a mail template.
///
/// A blank field (empty or whitespace only) means "use the template's text".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompositionOverride {
    /// Subject, without the shop name prefix
    pub subject: String,

    /// Text placed above the order details
    pub header: String,

    /// Text placed below the order details
    pub footer: String,
}

impl CompositionOverride {
    /// Override subject, or `default` when blank
    pub fn subject_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_blank_or(&self.subject, default)
    }

    /// Override header, or `default` when blank
    pub fn header_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_blank_or(&self.header, default)
    }

    /// Override footer, or `default` when blank
    pub fn footer_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_blank_or(&self.footer, default)
    }
}

fn non_blank_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

/// Everything needed to compose order mail
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailCompositionContext {
    /// ID of the template the mail is based on
    pub template_id: i64,

    /// Per-send edits to the template
    pub overrides: CompositionOverride,

    /// Orders to mail
    pub orders: TargetOrderSet,

    /// ID of the member sending the mail
    pub creator: Uuid,
}

/// Whether a run only previews the mail or sends it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendMode {
    /// Compose and return the messages, nothing is sent or recorded
    Confirm,

    /// Send every message and record its history
    Complete,
}
