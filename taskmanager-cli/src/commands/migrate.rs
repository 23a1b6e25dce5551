//! Create the database tables without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use taskmanager_server::store::{create_pool, migrations};

use crate::config::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run migrations against the configured database
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args.database.resolve()?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(())
}
