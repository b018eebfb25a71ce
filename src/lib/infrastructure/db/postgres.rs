//! Postgres module

mod mail_histories;
mod mail_templates;
mod orders;

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::PgPool;
use tracing::info;

/// Database connection
#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    /// The database connection pool
    pub pool: PgPool,
}

impl PostgresDatabase {
    /// Create a new database connection
    #[mutants::skip]
    pub async fn new(connection_string: &str) -> Result<Self> {
        Ok(Self {
            pool: PgPool::connect(connection_string)
                .await
                .context("failed to connect to the database")?,
        })
    }

    /// Apply any pending migrations
    #[mutants::skip]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("failed to run database migrations")?;

        info!("database migrations applied");

        Ok(())
    }
}

/// Database connection details
#[derive(Debug, Parser)]
pub struct DatabaseConnectionDetails {
    /// The database connection string
    #[arg(long, env = "DATABASE_URL")]
    pub connection_string: String,
}
