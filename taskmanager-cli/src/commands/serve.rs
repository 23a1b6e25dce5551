//! HTTP server command
//!
//! Runs migrations and then serves the task manager pages.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use taskmanager_server::store::{create_pool, migrations, MemoryStore, PgStore, TaskStore};
use taskmanager_server::{run_server, ServerConfig};

use crate::config::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host name or IP address to bind to
    #[arg(long, env = "IP", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, short = 'p', env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Application secret key
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Keep all data in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            secret_key: self.secret_key.clone(),
        }
    }
}

/// Open the configured store, running migrations for PostgreSQL.
async fn open_store(args: &ServeArgs) -> Result<Arc<dyn TaskStore>> {
    if args.in_memory {
        tracing::warn!("Using in-memory store, data will not persist");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let database_url = args.database.resolve()?;
    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(Arc::new(PgStore::new(pool)))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!("Starting taskmanager on {}:{}", config.host, config.port);

    let store = open_store(&args).await?;

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
