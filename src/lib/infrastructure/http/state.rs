//! Application state module

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};

use crate::domain::order_mail::OrderMailService;

/// Global application state
#[derive(Clone)]
pub struct AppState<S: OrderMailService> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// Order mail service
    pub order_mail: Arc<S>,
}

impl<S> AppState<S>
where
    S: OrderMailService,
{
    /// Create a new application state
    pub fn new(order_mail: S) -> Self {
        Self {
            start_time: Utc::now(),
            order_mail: Arc::new(order_mail),
        }
    }
}

impl<S> fmt::Debug for AppState<S>
where
    S: OrderMailService,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("order_mail", &"OrderMailService")
            .finish()
    }
}
