//! Task records and name validation

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::validation::{bounded_name, ValidationError};
use super::RecordId;

/// Maximum length for task names (`VARCHAR(50)`)
pub const MAX_TASK_NAME_LEN: usize = 50;

/// Task record from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Task {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub is_urgent: bool,
    pub due_date: NaiveDate,
    pub category_id: RecordId,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} - Task: {} | Urgent: {}",
            self.id, self.name, self.is_urgent
        )
    }
}

/// Task joined with its category name for list display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TaskWithCategory {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub is_urgent: bool,
    pub due_date: NaiveDate,
    pub category_id: RecordId,
    pub category_name: String,
}

impl TaskWithCategory {
    pub fn new(task: Task, category_name: String) -> Self {
        Self {
            id: task.id,
            name: task.name,
            description: task.description,
            is_urgent: task.is_urgent,
            due_date: task.due_date,
            category_id: task.category_id,
            category_name,
        }
    }
}

/// Validated task name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskName(String);

impl TaskName {
    /// Create a task name, trimming surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use taskmanager_server::models::TaskName;
    ///
    /// assert!(TaskName::new("Buy milk").is_ok());
    /// assert!(TaskName::new(&"x".repeat(51)).is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_name(s, "task name", MAX_TASK_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated input for creating or replacing a task.
///
/// Every mutable column is present, so an update is always a full replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: TaskName,
    pub description: String,
    pub is_urgent: bool,
    pub due_date: NaiveDate,
    pub category_id: RecordId,
}
