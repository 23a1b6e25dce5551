//! PostgreSQL store
//!
//! Every operation is a single statement except `delete_category`,
//! which deletes dependent tasks and then the category inside a transaction.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, TaskStore};
use crate::models::{Category, NewCategory, NewTask, RecordId, Task, TaskWithCategory};

const TASK_COLUMNS: &str = "id, task_name AS name, task_description AS description, \
                            is_urgent, due_date, category_id";

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map constraint violations onto domain errors.
fn constraint_error(
    err: sqlx::Error,
    resource: &'static str,
    name: &str,
    category_id: Option<RecordId>,
) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::Conflict {
                resource,
                name: name.to_owned(),
            };
        }
        if let (true, Some(id)) = (db.is_foreign_key_violation(), category_id) {
            return StoreError::MissingCategory { id };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl TaskStore for PgStore {
    async fn list_tasks(&self) -> Result<Vec<TaskWithCategory>, StoreError> {
        let tasks = sqlx::query_as::<_, TaskWithCategory>(
            r#"
            SELECT
                t.id,
                t.task_name AS name,
                t.task_description AS description,
                t.is_urgent,
                t.due_date,
                t.category_id,
                c.category_name
            FROM task t
            JOIN category c ON c.id = t.category_id
            ORDER BY t.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, category_name AS name FROM category ORDER BY category_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn get_task(&self, id: RecordId) -> Result<Task, StoreError> {
        sqlx::query_as::<_, Task>(&format!("SELECT {TASK_COLUMNS} FROM task WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound {
                resource: "task",
                id,
            })
    }

    async fn get_category(&self, id: RecordId) -> Result<Category, StoreError> {
        sqlx::query_as::<_, Category>(
            "SELECT id, category_name AS name FROM category WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            resource: "category",
            id,
        })
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, StoreError> {
        let name = category.name.as_str();
        let created = sqlx::query_as::<_, Category>(
            "INSERT INTO category (category_name) VALUES ($1) RETURNING id, category_name AS name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "category", name, None))?;

        tracing::debug!(id = created.id, name = %created.name, "category created");
        Ok(created)
    }

    async fn create_task(&self, task: NewTask) -> Result<Task, StoreError> {
        let created = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO task (task_name, task_description, is_urgent, due_date, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(task.name.as_str())
        .bind(&task.description)
        .bind(task.is_urgent)
        .bind(task.due_date)
        .bind(task.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "task", task.name.as_str(), Some(task.category_id)))?;

        tracing::debug!(id = created.id, name = %created.name, "task created");
        Ok(created)
    }

    async fn update_category(
        &self,
        id: RecordId,
        category: NewCategory,
    ) -> Result<Category, StoreError> {
        let name = category.name.as_str();
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE category SET category_name = $2
            WHERE id = $1
            RETURNING id, category_name AS name
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "category", name, None))?
        .ok_or(StoreError::NotFound {
            resource: "category",
            id,
        })
    }

    async fn update_task(&self, id: RecordId, task: NewTask) -> Result<Task, StoreError> {
        sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE task SET
                task_name = $2,
                task_description = $3,
                is_urgent = $4,
                due_date = $5,
                category_id = $6
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(task.name.as_str())
        .bind(&task.description)
        .bind(task.is_urgent)
        .bind(task.due_date)
        .bind(task.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "task", task.name.as_str(), Some(task.category_id)))?
        .ok_or(StoreError::NotFound { resource: "task", id })
    }

    async fn delete_category(&self, id: RecordId) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let tasks_removed = sqlx::query("DELETE FROM task WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            // Dropping the transaction rolls it back
            return Err(StoreError::NotFound {
                resource: "category",
                id,
            });
        }

        tx.commit().await?;
        tracing::debug!(id, tasks_removed, "category deleted");
        Ok(tasks_removed)
    }

    async fn delete_task(&self, id: RecordId) -> Result<(), StoreError> {
        let deleted = sqlx::query("DELETE FROM task WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::NotFound { resource: "task", id });
        }

        tracing::debug!(id, "task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryName, TaskName};
    use crate::store::{create_pool, migrations};
    use chrono::NaiveDate;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p taskmanager-server -- --ignored

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        PgStore::new(pool)
    }

    fn unique(prefix: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        format!("{prefix}-{nanos}")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_category_is_conflict() {
        let store = store().await;
        let name = unique("dup");
        let new = NewCategory {
            name: CategoryName::new(&name).unwrap(),
        };

        let created = store.create_category(new.clone()).await.unwrap();
        let err = store.create_category(new).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { resource: "category", .. }));

        store.delete_category(created.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_category_cascades() {
        let store = store().await;
        let category = store
            .create_category(NewCategory {
                name: CategoryName::new(&unique("cat")).unwrap(),
            })
            .await
            .unwrap();

        let task = store
            .create_task(NewTask {
                name: TaskName::new(&unique("task")).unwrap(),
                description: String::new(),
                is_urgent: false,
                due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                category_id: category.id,
            })
            .await
            .unwrap();

        assert_eq!(store.delete_category(category.id).await.unwrap(), 1);
        assert!(matches!(
            store.get_task(task.id).await.unwrap_err(),
            StoreError::NotFound { resource: "task", .. }
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn task_with_unknown_category_is_rejected() {
        let store = store().await;
        let err = store
            .create_task(NewTask {
                name: TaskName::new(&unique("orphan")).unwrap(),
                description: String::new(),
                is_urgent: false,
                due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                category_id: -1,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::MissingCategory { id: -1 }));
    }
}
