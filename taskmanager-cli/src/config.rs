//! Database URL resolution
//!
//! In development the URL comes from `DB_URL`; otherwise from the
//! hosting provider's `DATABASE_URL`, which may use the `postgres://`
//! scheme spelling.

use anyhow::{bail, Result};
use clap::builder::BoolishValueParser;
use clap::Args;

/// Database connection options shared by `serve` and `migrate`
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Use the local development database (--db-url) instead of --database-url
    #[arg(long, env = "DEVELOPMENT", value_parser = BoolishValueParser::new())]
    pub development: bool,

    /// Local development database URL
    #[arg(long, env = "DB_URL")]
    pub db_url: Option<String>,

    /// Deployment database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl DatabaseArgs {
    /// Pick the database URL for the current mode.
    pub fn resolve(&self) -> Result<String> {
        if self.development {
            match &self.db_url {
                Some(url) => Ok(url.clone()),
                None => bail!("DB_URL not set. Set via --db-url or the DB_URL environment variable"),
            }
        } else {
            match &self.database_url {
                Some(url) => Ok(normalize_database_url(url)),
                None => bail!(
                    "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env"
                ),
            }
        }
    }
}

/// Rewrite a leading `postgres://` to `postgresql://`, once.
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{rest}"),
        None => url.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_postgres_scheme() {
        assert_eq!(
            normalize_database_url("postgres://u:p@host:5432/db"),
            "postgresql://u:p@host:5432/db"
        );
    }

    #[test]
    fn rewrites_only_the_prefix() {
        assert_eq!(
            normalize_database_url("postgres://host/postgres://db"),
            "postgresql://host/postgres://db"
        );
        assert_eq!(
            normalize_database_url("postgresql://host/db"),
            "postgresql://host/db"
        );
    }

    #[test]
    fn development_uses_db_url_verbatim() {
        let args = DatabaseArgs {
            development: true,
            db_url: Some("postgres://localhost/tasks".into()),
            database_url: Some("postgresql://remote/tasks".into()),
        };
        assert_eq!(args.resolve().unwrap(), "postgres://localhost/tasks");
    }

    #[test]
    fn deployment_uses_normalized_database_url() {
        let args = DatabaseArgs {
            development: false,
            db_url: Some("postgresql://localhost/tasks".into()),
            database_url: Some("postgres://remote/tasks".into()),
        };
        assert_eq!(args.resolve().unwrap(), "postgresql://remote/tasks");
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = DatabaseArgs::default().resolve().unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL not set"));

        let args = DatabaseArgs {
            development: true,
            ..Default::default()
        };
        assert!(args.resolve().unwrap_err().to_string().contains("DB_URL not set"));
    }
}
