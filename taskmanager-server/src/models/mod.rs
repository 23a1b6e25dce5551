//! Domain models with validation at construction
//!
//! All form input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod category;
pub mod form;
pub mod task;
pub mod validation;

pub use category::{Category, CategoryName, NewCategory};
pub use form::{CategoryForm, TaskForm};
pub use task::{NewTask, Task, TaskName, TaskWithCategory};
pub use validation::ValidationError;

/// Primary key type shared by both tables (PostgreSQL `SERIAL`).
pub type RecordId = i32;
