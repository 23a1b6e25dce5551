//! Form bodies as submitted by the browser
//!
//! Field names match the `name` attributes in the templates. Every field is
//! optional at decode time so that a missing field becomes a
//! `ValidationError` instead of an opaque extractor rejection.

use chrono::NaiveDate;
use serde::Deserialize;

use super::validation::ValidationError;
use super::{CategoryName, NewCategory, NewTask, RecordId, TaskName};

/// `application/x-www-form-urlencoded` body of the category forms
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    pub category_name: Option<String>,
}

impl CategoryForm {
    pub fn validate(self) -> Result<NewCategory, ValidationError> {
        let name = CategoryName::new(self.category_name.as_deref().unwrap_or_default())?;
        Ok(NewCategory { name })
    }
}

/// `application/x-www-form-urlencoded` body of the task forms
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskForm {
    pub task_name: Option<String>,
    pub task_description: Option<String>,
    /// Checkbox: browsers omit the field entirely when unchecked
    pub is_urgent: Option<String>,
    pub due_date: Option<String>,
    pub category_id: Option<String>,
}

impl TaskForm {
    /// Validate every field.
    ///
    /// Optional fields that were not submitted take their defaults
    /// (empty description, not urgent) rather than keeping a previous value.
    pub fn validate(self) -> Result<NewTask, ValidationError> {
        let name = TaskName::new(self.task_name.as_deref().unwrap_or_default())?;
        let description = self.task_description.unwrap_or_default();
        let is_urgent = self.is_urgent.is_some_and(|v| !v.is_empty());
        let due_date = parse_due_date(self.due_date.as_deref())?;
        let category_id = parse_category_id(self.category_id.as_deref())?;

        Ok(NewTask {
            name,
            description,
            is_urgent,
            due_date,
            category_id,
        })
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Empty { field }),
    }
}

fn parse_due_date(value: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let raw = required(value, "due date")?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: "due date",
        reason: "expected a date in YYYY-MM-DD format",
    })
}

fn parse_category_id(value: Option<&str>) -> Result<RecordId, ValidationError> {
    let raw = required(value, "category")?;
    raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "category",
        reason: "expected a numeric category id",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> TaskForm {
        TaskForm {
            task_name: Some("Buy milk".into()),
            task_description: Some("Two litres".into()),
            is_urgent: Some("on".into()),
            due_date: Some("2024-01-01".into()),
            category_id: Some("3".into()),
        }
    }

    #[test]
    fn valid_task_form() {
        let task = full_form().validate().unwrap();
        assert_eq!(task.name.as_str(), "Buy milk");
        assert_eq!(task.description, "Two litres");
        assert!(task.is_urgent);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(task.category_id, 3);
    }

    #[test]
    fn omitted_optional_fields_take_defaults() {
        let form = TaskForm {
            task_description: None,
            is_urgent: None,
            ..full_form()
        };
        let task = form.validate().unwrap();
        assert_eq!(task.description, "");
        assert!(!task.is_urgent);
    }

    #[test]
    fn empty_checkbox_value_is_not_urgent() {
        let form = TaskForm {
            is_urgent: Some(String::new()),
            ..full_form()
        };
        assert!(!form.validate().unwrap().is_urgent);
    }

    #[test]
    fn missing_due_date() {
        let form = TaskForm {
            due_date: None,
            ..full_form()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::Empty { field: "due date" }
        );
    }

    #[test]
    fn malformed_due_date() {
        let form = TaskForm {
            due_date: Some("01/02/2024".into()),
            ..full_form()
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::InvalidFormat { field: "due date", .. }
        ));
    }

    #[test]
    fn malformed_category_id() {
        let form = TaskForm {
            category_id: Some("home".into()),
            ..full_form()
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::InvalidFormat { field: "category", .. }
        ));
    }

    #[test]
    fn missing_category_name() {
        let err = CategoryForm::default().validate().unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "category name" });
    }
}
