//! Mail transport module

mod errors;
mod message;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

pub use errors::MailerError;
pub use message::Message;

/// Mail transport
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to send.
    ///
    /// # Returns
    /// [`Ok`] once the transport has accepted the message, or an [`Err`] containing a
    /// [`MailerError`] if it was rejected.
    async fn send_email(&self, message: &Message) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_email(&self, message: &Message) -> Result<(), MailerError>;
    }
}
