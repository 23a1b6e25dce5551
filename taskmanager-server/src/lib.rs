//! taskmanager-server: categories and tasks over server-rendered HTML forms
//!
//! Layers, bottom-up:
//! - `models`: validated domain input decoded from form bodies
//! - `store`: the `TaskStore` trait with PostgreSQL and in-memory backends
//! - `views`: handlebars templates compiled into the binary
//! - `http`: axum router, handlers, extractors and error pages

pub mod http;
pub mod models;
pub mod state;
pub mod store;
pub mod views;

pub use http::{build_router, run_server, AppError, ServerConfig, ServerError};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, StoreError, TaskStore};
