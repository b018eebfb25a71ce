#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! REST API for composing and sending order mail

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use order_mail::{
    domain::order_mail::OrderMailServiceImpl,
    infrastructure::{
        db::postgres::{DatabaseConnectionDetails, PostgresDatabase},
        email::smtp::{SMTPConfig, SMTPMailer},
        http::{HttpServer, HttpServerConfig},
        settings::OrderMailSettings,
    },
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The database connection details
    #[clap(flatten)]
    pub db: DatabaseConnectionDetails,

    /// The SMTP configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// Shop-level order mail settings
    #[clap(flatten)]
    pub order_mail: OrderMailSettings,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(err) if err.not_found() => {}
        Err(err) => {
            eprintln!("Failed to load environment: {}", err);

            return Err(err.into());
        }
    }

    tracing_subscriber::fmt::init();

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("failed to install the rustls crypto provider"))?;

    let args = Args::parse();

    let postgres = Arc::new(PostgresDatabase::new(&args.db.connection_string).await?);
    postgres.migrate().await?;

    let service = OrderMailServiceImpl::new(
        Arc::clone(&postgres),
        Arc::clone(&postgres),
        Arc::clone(&postgres),
        Arc::new(SMTPMailer::new(args.smtp)?),
        args.order_mail.into(),
    );

    HttpServer::new(service, args.server).await?.run().await
}
