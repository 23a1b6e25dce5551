//! HTTP server layer
//!
//! Axum server with:
//! - Server-rendered HTML pages and form handlers
//! - Request tracing
//! - Graceful shutdown
//! - HTML error pages

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::AppError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
