//! Storage layer - the `TaskStore` trait and its backends
//!
//! # Design Principles
//!
//! - Handlers receive the store through `AppState`, never a global handle
//! - Task lists JOIN the category name in the same query (no N+1)
//! - Rely on DB constraints and map their violations to `StoreError`
//! - Category deletion removes dependents and parent in one transaction

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{Category, NewCategory, NewTask, RecordId, Task, TaskWithCategory};

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgStore;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: RecordId },

    #[error("{resource} '{name}' already exists")]
    Conflict { resource: &'static str, name: String },

    #[error("category {id} does not exist")]
    MissingCategory { id: RecordId },
}

/// Category and task persistence.
///
/// Updates replace every mutable column of the record.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks with their category names, ordered by id ascending.
    async fn list_tasks(&self) -> Result<Vec<TaskWithCategory>, StoreError>;

    /// All categories ordered by name ascending.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn get_task(&self, id: RecordId) -> Result<Task, StoreError>;

    async fn get_category(&self, id: RecordId) -> Result<Category, StoreError>;

    async fn create_category(&self, category: NewCategory) -> Result<Category, StoreError>;

    async fn create_task(&self, task: NewTask) -> Result<Task, StoreError>;

    async fn update_category(
        &self,
        id: RecordId,
        category: NewCategory,
    ) -> Result<Category, StoreError>;

    async fn update_task(&self, id: RecordId, task: NewTask) -> Result<Task, StoreError>;

    /// Delete a category and every task that references it.
    ///
    /// Returns the number of tasks removed alongside the category.
    async fn delete_category(&self, id: RecordId) -> Result<u64, StoreError>;

    async fn delete_task(&self, id: RecordId) -> Result<(), StoreError>;
}
