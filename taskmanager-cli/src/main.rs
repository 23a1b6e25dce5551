//! taskmanager CLI - serves the task manager web application
//!
//! - `serve`: run the HTTP server (PostgreSQL or in-memory store)
//! - `migrate`: create the database tables and exit

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(name = "taskmanager", version, about = "Categories and tasks over HTML forms")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, env = "DEBUG", value_parser = BoolishValueParser::new())]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::ServeArgs),
    /// Create the database tables and exit
    Migrate(commands::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Values already in the environment take precedence over .env
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })
        .context("Failed to initialize tracing")?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }

    Ok(())
}
