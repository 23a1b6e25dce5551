//! Category records and name validation

use std::fmt;

use serde::Serialize;
use sqlx::FromRow;

use super::validation::{bounded_name, ValidationError};
use super::RecordId;

/// Maximum length for category names (`VARCHAR(25)`)
pub const MAX_CATEGORY_NAME_LEN: usize = 25;

/// Category record from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Validated category name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name, trimming surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use taskmanager_server::models::CategoryName;
    ///
    /// assert!(CategoryName::new("Home").is_ok());
    /// assert!(CategoryName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_name(s, "category name", MAX_CATEGORY_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated input for creating or replacing a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: CategoryName,
}
