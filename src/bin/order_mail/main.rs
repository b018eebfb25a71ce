#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command line tool to preview or send order mail

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};
use order_mail::{
    domain::{
        communication::mailer::{Mailer, MailerError, Message},
        order_mail::{
            CompositionOverride, DispatchReport, MailCompositionContext, OrderMailServiceImpl,
            SendMode, SendOutcome, TargetOrderSet,
        },
    },
    infrastructure::{
        db::postgres::{DatabaseConnectionDetails, PostgresDatabase},
        email::smtp::{SMTPConfig, SMTPMailer},
        settings::OrderMailSettings,
    },
};
use tracing::info;
use uuid::Uuid;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(name = "order-mail", about = "Preview or send order mail from a template")]
pub struct Cli {
    /// The database connection details
    #[clap(flatten)]
    pub db: DatabaseConnectionDetails,

    /// Shop-level order mail settings
    #[clap(flatten)]
    pub order_mail: OrderMailSettings,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Order mail commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the mail that would be sent. Nothing is sent or recorded.
    Preview(MailArgs),

    /// Send the mail and record it in each order's history
    Send {
        /// What to send
        #[clap(flatten)]
        mail: MailArgs,

        /// The SMTP configuration
        #[clap(flatten)]
        smtp: SMTPConfig,
    },
}

/// What to send, and to which orders
#[derive(Debug, Args)]
pub struct MailArgs {
    /// ID of the mail template
    #[arg(long)]
    pub template: i64,

    /// Comma-separated order IDs, e.g. `1,2,3`
    #[arg(long)]
    pub ids: TargetOrderSet,

    /// ID of the member sending the mail
    #[arg(long)]
    pub creator: Uuid,

    /// Subject override
    #[arg(long, default_value = "")]
    pub subject: String,

    /// Header override
    #[arg(long, default_value = "")]
    pub header: String,

    /// Footer override
    #[arg(long, default_value = "")]
    pub footer: String,
}

impl From<MailArgs> for MailCompositionContext {
    fn from(args: MailArgs) -> Self {
        MailCompositionContext {
            template_id: args.template,
            overrides: CompositionOverride {
                subject: args.subject,
                header: args.header,
                footer: args.footer,
            },
            orders: args.ids,
            creator: args.creator,
        }
    }
}

/// Stands in for a transport when previewing, which never sends
#[derive(Clone, Debug)]
struct PreviewMailer;

#[async_trait]
impl Mailer for PreviewMailer {
    async fn send_email(&self, _message: &Message) -> Result<(), MailerError> {
        Err(anyhow!("previews do not send mail").into())
    }
}

#[mutants::skip]
async fn run<M: Mailer>(
    postgres: Arc<PostgresDatabase>,
    mailer: M,
    settings: OrderMailSettings,
    context: &MailCompositionContext,
    mode: SendMode,
) -> Result<SendOutcome> {
    let service = OrderMailServiceImpl::new(
        Arc::clone(&postgres),
        Arc::clone(&postgres),
        Arc::clone(&postgres),
        Arc::new(mailer),
        settings.into(),
    );

    info!(orders = context.orders.len(), ?mode, "running order mail");

    Ok(service.run(context, mode).await?)
}

#[mutants::skip]
fn print_report(report: &DispatchReport) -> Result<()> {
    println!("Sent: {}", report.sent_count);

    for failure in &report.failures {
        println!("Not sent: order {} ({})", failure.order_id, failure.reason);
    }

    for order_id in &report.unrecorded_order_ids {
        println!("Sent but not recorded in history: order {order_id}");
    }

    if !report.is_complete() {
        bail!(
            "{} order(s) could not be mailed, {} sent order(s) are missing from history",
            report.failures.len(),
            report.unrecorded_order_ids.len()
        );
    }

    Ok(())
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(err) if err.not_found() => {}
        Err(err) => return Err(err.into()),
    }

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let postgres = Arc::new(PostgresDatabase::new(&cli.db.connection_string).await?);

    let outcome = match cli.command {
        Command::Preview(args) => {
            let context = MailCompositionContext::from(args);

            run(
                postgres,
                PreviewMailer,
                cli.order_mail,
                &context,
                SendMode::Confirm,
            )
            .await?
        }
        Command::Send { mail, smtp } => {
            let context = MailCompositionContext::from(mail);

            run(
                postgres,
                SMTPMailer::new(smtp)?,
                cli.order_mail,
                &context,
                SendMode::Complete,
            )
            .await?
        }
    };

    match outcome {
        SendOutcome::Previewed(messages) => {
            for message in messages {
                println!("To: {}", message.to);
                println!("Subject: {}", message.subject);
                println!();
                println!("{}", message.body);
                println!("----");
            }

            Ok(())
        }
        SendOutcome::Dispatched(report) => print_report(&report),
    }
}
