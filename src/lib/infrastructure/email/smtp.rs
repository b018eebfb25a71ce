//! SMTP mailer implementation

use std::{fmt, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message as EmailMessage, Tokio1Executor,
};
use tracing::debug;

use crate::domain::communication::mailer::{Mailer, MailerError, Message};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT")]
    pub port: u16,

    /// The SMTP username
    #[clap(long, env = "SMTP_USER")]
    pub username: String,

    /// The SMTP password
    #[clap(long, env = "SMTP_PASSWORD")]
    pub password: String,

    /// The sender email address, e.g. `Shop <shop@example.com>`
    #[clap(long, env = "SMTP_SENDER")]
    pub sender: String,

    /// Verify the TLS certificate
    #[clap(long, env = "SMTP_VERIFY_TLS", default_value = "true")]
    pub verify_tls: bool,

    /// Enable STARTTLS (TLS upgrade on connection) instead of implicit TLS
    #[clap(long, env = "SMTP_STARTTLS", default_value = "true")]
    pub starttls: bool,

    /// Connection timeout in seconds
    #[clap(long, env = "SMTP_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,
}

/// SMTP mailer
#[derive(Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl fmt::Debug for SMTPMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SMTPMailer")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("sender", &self.config.sender)
            .finish()
    }
}

impl SMTPMailer {
    /// Create a new SMTP mailer. No connection is made until the first message is sent.
    pub fn new(config: SMTPConfig) -> Result<Self> {
        let tls_parameters = TlsParameters::builder(config.host.clone())
            .dangerous_accept_invalid_certs(!config.verify_tls)
            .build()?;

        let tls = if config.starttls {
            Tls::Required(tls_parameters)
        } else {
            Tls::Wrapper(tls_parameters)
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .tls(tls)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self { config, transport })
    }

    fn build_message(&self, message: &Message) -> Result<EmailMessage, MailerError> {
        let from: Mailbox = match &message.from {
            Some(from) => from.as_str().parse(),
            None => self.config.sender.parse(),
        }
        .map_err(|_| MailerError::InvalidEmail)?;

        let to: Mailbox = message
            .to
            .as_str()
            .parse()
            .map_err(|_| MailerError::InvalidEmail)?;

        EmailMessage::builder()
            .from(from)
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|err| MailerError::UnknownError(err.into()))
    }
}

#[async_trait]
impl Mailer for SMTPMailer {
    #[mutants::skip]
    async fn send_email(&self, message: &Message) -> Result<(), MailerError> {
        let email = self.build_message(message)?;

        match self.transport.send(email).await {
            Ok(_) => {
                debug!(to = %message.to, "SMTP server accepted message");
                Ok(())
            }
            Err(err) if err.is_permanent() => Err(MailerError::Rejected(err.to_string())),
            Err(err) => Err(MailerError::UnknownError(err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::communication::email_addresses::EmailAddress;

    use super::*;

    fn config() -> SMTPConfig {
        SMTPConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: "shop".to_string(),
            password: "secret".to_string(),
            sender: "ShopX <shop@example.com>".to_string(),
            verify_tls: false,
            starttls: true,
            timeout_secs: 5,
        }
    }

    fn message() -> Message {
        Message {
            to: EmailAddress::new_unchecked("customer1@example.com"),
            from: None,
            subject: "[ShopX] Hello".to_string(),
            body: "Thank you\n\nOrder No.: 000001".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_message_uses_configured_sender() -> TestResult {
        let mailer = SMTPMailer::new(config())?;

        let email = mailer.build_message(&message())?;
        let formatted = String::from_utf8(email.formatted())?;

        assert!(formatted.contains("From: ShopX <shop@example.com>"));
        assert!(formatted.contains("To: customer1@example.com"));
        assert!(formatted.contains("Subject: [ShopX] Hello"));
        assert!(formatted.contains("Content-Type: text/plain"));

        Ok(())
    }

    #[tokio::test]
    async fn test_build_message_prefers_message_sender() -> TestResult {
        let mailer = SMTPMailer::new(config())?;
        let message = Message {
            from: Some(EmailAddress::new_unchecked("orders@example.com")),
            ..message()
        };

        let formatted = String::from_utf8(mailer.build_message(&message)?.formatted())?;

        assert!(formatted.contains("From: orders@example.com"));

        Ok(())
    }

    #[tokio::test]
    async fn test_build_message_rejects_invalid_sender() -> TestResult {
        let mailer = SMTPMailer::new(SMTPConfig {
            sender: "not an address".to_string(),
            ..config()
        })?;

        let result = mailer.build_message(&message());

        assert!(matches!(result, Err(MailerError::InvalidEmail)));

        Ok(())
    }

    #[tokio::test]
    async fn test_build_message_rejects_invalid_recipient() -> TestResult {
        let mailer = SMTPMailer::new(config())?;
        let message = Message {
            to: EmailAddress::new_unchecked("nobody"),
            ..message()
        };

        assert!(matches!(
            mailer.build_message(&message),
            Err(MailerError::InvalidEmail)
        ));

        Ok(())
    }
}
