//! Shop-level order mail settings read from the command line or environment

use std::time::Duration;

use clap::Parser;

use crate::domain::order_mail::OrderMailConfig;

/// Order mail settings
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct OrderMailSettings {
    /// Shop name, used as the subject prefix
    #[arg(long, env = "SHOP_NAME")]
    pub shop_name: String,

    /// Seconds to wait for the mail server to accept one message
    #[arg(long, env = "MAIL_SEND_TIMEOUT_SECS", default_value = "30")]
    pub send_timeout_secs: u64,
}

impl From<OrderMailSettings> for OrderMailConfig {
    fn from(settings: OrderMailSettings) -> Self {
        OrderMailConfig {
            shop_name: settings.shop_name,
            send_timeout: Duration::from_secs(settings.send_timeout_secs),
        }
    }
}
