//! Schema migrations for the category and task tables
//!
//! Table and column names follow the schema the application has always
//! used, so an existing database can be served without changes.

use sqlx::PgPool;

/// Create the tables if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running taskmanager migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS category (
            id SERIAL PRIMARY KEY,
            category_name VARCHAR(25) NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS task (
            id SERIAL PRIMARY KEY,
            task_name VARCHAR(50) NOT NULL UNIQUE,
            task_description TEXT NOT NULL,
            is_urgent BOOLEAN NOT NULL DEFAULT FALSE,
            due_date DATE NOT NULL,
            category_id INTEGER NOT NULL REFERENCES category(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_task_category_id ON task(category_id)")
        .execute(pool)
        .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
