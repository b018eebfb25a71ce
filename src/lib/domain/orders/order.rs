//! Order model

use std::{fmt, num::ParseIntError, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::communication::email_addresses::EmailAddress;

/// Order identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Create a new order ID
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw ID
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for OrderId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single line of an order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product name at the time of ordering
    pub product_name: String,

    /// Quantity ordered
    pub quantity: i32,

    /// Unit price including tax
    pub price: i64,
}

impl OrderItem {
    /// Price multiplied by quantity
    pub fn subtotal(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }
}

/// Order model
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID
    pub id: OrderId,

    /// Customer-facing order number
    pub order_no: String,

    /// Name of the ordering customer
    pub customer_name: String,

    /// Customer email, `None` when the order has no usable contact address
    pub email: Option<EmailAddress>,

    /// Date the order was placed in UTC
    pub ordered_at: DateTime<Utc>,

    /// Ordered items
    pub items: Vec<OrderItem>,

    /// Total amount charged
    pub payment_total: i64,
}
