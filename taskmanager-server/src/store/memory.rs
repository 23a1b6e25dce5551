//! In-memory store
//!
//! Enforces the same rules as the PostgreSQL schema: unique names,
//! tasks must reference an existing category, and deleting a category
//! cascades to its tasks. Used by tests and `serve --in-memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TaskStore};
use crate::models::{Category, NewCategory, NewTask, RecordId, Task, TaskWithCategory};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<RecordId, Category>,
    tasks: BTreeMap<RecordId, Task>,
    /// Last assigned ids; like SERIAL, ids are never reused
    category_seq: RecordId,
    task_seq: RecordId,
}

impl Tables {
    fn category_name_taken(&self, name: &str, except: Option<RecordId>) -> bool {
        self.categories
            .values()
            .any(|c| c.name == name && Some(c.id) != except)
    }

    fn task_name_taken(&self, name: &str, except: Option<RecordId>) -> bool {
        self.tasks
            .values()
            .any(|t| t.name == name && Some(t.id) != except)
    }

    fn check_task(&self, task: &NewTask, except: Option<RecordId>) -> Result<(), StoreError> {
        if !self.categories.contains_key(&task.category_id) {
            return Err(StoreError::MissingCategory {
                id: task.category_id,
            });
        }
        if self.task_name_taken(task.name.as_str(), except) {
            return Err(StoreError::Conflict {
                resource: "task",
                name: task.name.as_str().to_owned(),
            });
        }
        Ok(())
    }
}

/// Store kept entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self) -> Result<Vec<TaskWithCategory>, StoreError> {
        let tables = self.tables.read().await;

        // BTreeMap iteration is already ordered by id
        let tasks = tables
            .tasks
            .values()
            .filter_map(|task| {
                let category = tables.categories.get(&task.category_id)?;
                Some(TaskWithCategory::new(task.clone(), category.name.clone()))
            })
            .collect();

        Ok(tasks)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables.categories.values().cloned().collect();
        // Alphabetical like a collated ORDER BY, not by byte value
        categories.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    async fn get_task(&self, id: RecordId) -> Result<Task, StoreError> {
        self.tables
            .read()
            .await
            .tasks
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { resource: "task", id })
    }

    async fn get_category(&self, id: RecordId) -> Result<Category, StoreError> {
        self.tables
            .read()
            .await
            .categories
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                resource: "category",
                id,
            })
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, StoreError> {
        let mut tables = self.tables.write().await;
        let name = category.name.into_string();

        if tables.category_name_taken(&name, None) {
            return Err(StoreError::Conflict {
                resource: "category",
                name,
            });
        }

        tables.category_seq += 1;
        let created = Category {
            id: tables.category_seq,
            name,
        };
        tables.categories.insert(created.id, created.clone());

        tracing::debug!(id = created.id, name = %created.name, "category created");
        Ok(created)
    }

    async fn create_task(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_task(&task, None)?;

        tables.task_seq += 1;
        let created = Task {
            id: tables.task_seq,
            name: task.name.into_string(),
            description: task.description,
            is_urgent: task.is_urgent,
            due_date: task.due_date,
            category_id: task.category_id,
        };
        tables.tasks.insert(created.id, created.clone());

        tracing::debug!(id = created.id, name = %created.name, "task created");
        Ok(created)
    }

    async fn update_category(
        &self,
        id: RecordId,
        category: NewCategory,
    ) -> Result<Category, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&id) {
            return Err(StoreError::NotFound {
                resource: "category",
                id,
            });
        }

        let name = category.name.into_string();
        if tables.category_name_taken(&name, Some(id)) {
            return Err(StoreError::Conflict {
                resource: "category",
                name,
            });
        }

        let updated = Category { id, name };
        tables.categories.insert(id, updated.clone());
        Ok(updated)
    }

    async fn update_task(&self, id: RecordId, task: NewTask) -> Result<Task, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.tasks.contains_key(&id) {
            return Err(StoreError::NotFound { resource: "task", id });
        }
        tables.check_task(&task, Some(id))?;

        let updated = Task {
            id,
            name: task.name.into_string(),
            description: task.description,
            is_urgent: task.is_urgent,
            due_date: task.due_date,
            category_id: task.category_id,
        };
        tables.tasks.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_category(&self, id: RecordId) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Err(StoreError::NotFound {
                resource: "category",
                id,
            });
        }

        let before = tables.tasks.len();
        tables.tasks.retain(|_, task| task.category_id != id);
        let tasks_removed = (before - tables.tasks.len()) as u64;

        tracing::debug!(id, tasks_removed, "category deleted");
        Ok(tasks_removed)
    }

    async fn delete_task(&self, id: RecordId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.tasks.remove(&id).is_none() {
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
    use chrono::NaiveDate;

    fn category(name: &str) -> NewCategory {
        NewCategory {
            name: CategoryName::new(name).unwrap(),
        }
    }

    fn task(name: &str, category_id: RecordId) -> NewTask {
        NewTask {
            name: TaskName::new(name).unwrap(),
            description: format!("{name} description"),
            is_urgent: false,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category_id,
        }
    }

    #[tokio::test]
    async fn categories_listed_by_name() {
        let store = MemoryStore::new();
        for name in ["Work", "Home", "Errands"] {
            store.create_category(category(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Errands", "Home", "Work"]);
    }

    #[tokio::test]
    async fn categories_listed_alphabetically_regardless_of_case() {
        let store = MemoryStore::new();
        for name in ["banana", "Cherry", "apple", "Apple"] {
            store.create_category(category(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Apple", "apple", "banana", "Cherry"]);
    }

    #[tokio::test]
    async fn tasks_listed_by_id_with_category_name() {
        let store = MemoryStore::new();
        let home = store.create_category(category("Home")).await.unwrap();
        let work = store.create_category(category("Work")).await.unwrap();

        store.create_task(task("Zebra", work.id)).await.unwrap();
        store.create_task(task("Apple", home.id)).await.unwrap();

        let tasks = store.list_tasks().await.unwrap();
        let summary: Vec<(RecordId, &str, &str)> = tasks
            .iter()
            .map(|t| (t.id, t.name.as_str(), t.category_name.as_str()))
            .collect();
        assert_eq!(summary, [(1, "Zebra", "Work"), (2, "Apple", "Home")]);
    }

    #[tokio::test]
    async fn duplicate_names_conflict() {
        let store = MemoryStore::new();
        let home = store.create_category(category("Home")).await.unwrap();
        let err = store.create_category(category("Home")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { resource: "category", .. }));

        store.create_task(task("Buy milk", home.id)).await.unwrap();
        let err = store.create_task(task("Buy milk", home.id)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { resource: "task", .. }));
    }

    #[tokio::test]
    async fn renaming_to_own_name_is_not_a_conflict() {
        let store = MemoryStore::new();
        let home = store.create_category(category("Home")).await.unwrap();
        let updated = store
            .update_category(home.id, category("Home"))
            .await
            .unwrap();
        assert_eq!(updated, home);
    }

    #[tokio::test]
    async fn task_requires_existing_category() {
        let store = MemoryStore::new();
        let err = store.create_task(task("Orphan", 42)).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingCategory { id: 42 }));
    }

    #[tokio::test]
    async fn update_task_replaces_every_field() {
        let store = MemoryStore::new();
        let home = store.create_category(category("Home")).await.unwrap();
        let work = store.create_category(category("Work")).await.unwrap();

        let mut original = task("Buy milk", home.id);
        original.is_urgent = true;
        let created = store.create_task(original).await.unwrap();

        let replacement = NewTask {
            name: TaskName::new("Buy oat milk").unwrap(),
            description: String::new(),
            is_urgent: false,
            due_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            category_id: work.id,
        };
        store.update_task(created.id, replacement).await.unwrap();

        let stored = store.get_task(created.id).await.unwrap();
        assert_eq!(
            stored,
            Task {
                id: created.id,
                name: "Buy oat milk".into(),
                description: String::new(),
                is_urgent: false,
                due_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                category_id: work.id,
            }
        );
    }

    #[tokio::test]
    async fn delete_category_cascades_to_tasks() {
        let store = MemoryStore::new();
        let home = store.create_category(category("Home")).await.unwrap();
        let work = store.create_category(category("Work")).await.unwrap();

        store.create_task(task("Buy milk", home.id)).await.unwrap();
        store.create_task(task("Water plants", home.id)).await.unwrap();
        store.create_task(task("Write report", work.id)).await.unwrap();

        assert_eq!(store.delete_category(home.id).await.unwrap(), 2);

        let remaining: Vec<String> = store
            .list_tasks()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(remaining, ["Write report"]);
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.get_task(1).await.unwrap_err(),
            StoreError::NotFound { resource: "task", id: 1 }
        ));
        assert!(matches!(
            store.delete_category(9).await.unwrap_err(),
            StoreError::NotFound { resource: "category", id: 9 }
        ));
        assert!(matches!(
            store.delete_task(3).await.unwrap_err(),
            StoreError::NotFound { resource: "task", id: 3 }
        ));
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let store = MemoryStore::new();
        let first = store.create_category(category("Home")).await.unwrap();
        store.delete_category(first.id).await.unwrap();
        let second = store.create_category(category("Home")).await.unwrap();
        assert_eq!(second.id, first.id + 1);
    }
}
