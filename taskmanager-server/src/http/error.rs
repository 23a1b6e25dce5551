//! Handler error type with IntoResponse
//!
//! Errors are rendered as HTML error pages with the matching status code.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;

use crate::models::{RecordId, ValidationError};
use crate::store::StoreError;
use crate::views::{self, ViewError};

/// Handler error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum AppError {
    /// Form input failed validation (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Unique name already taken (409)
    Conflict { resource: &'static str, name: String },

    /// Task references a category that does not exist (400)
    MissingCategory { id: RecordId },

    /// Body could not be read as a form (415, 422, ...)
    Form(FormRejection),

    /// Database error (500, logged)
    Database(StoreError),

    /// Template rendering failed (500, logged)
    Render(ViewError),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                format!("{} {} not found", resource, id),
            ),
            Self::Conflict { resource, name } => (
                StatusCode::CONFLICT,
                format!("{} '{}' already exists", resource, name),
            ),
            Self::MissingCategory { id } => (
                StatusCode::BAD_REQUEST,
                format!("category {} does not exist", id),
            ),
            Self::Form(rejection) => (rejection.status(), rejection.body_text()),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_owned(),
                )
            }
            Self::Render(e) => {
                tracing::error!("Render error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_owned(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let page = views::render(
            "error",
            &json!({
                "status": status.as_u16(),
                "reason": status.canonical_reason().unwrap_or_default(),
                "message": message,
            }),
        );

        match page {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, message).into_response()
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self::Form(rejection)
    }
}

impl From<ViewError> for AppError {
    fn from(e: ViewError) -> Self {
        Self::Render(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { resource, id } => Self::NotFound {
                resource,
                id: id.to_string(),
            },
            StoreError::Conflict { resource, name } => Self::Conflict { resource, name },
            StoreError::MissingCategory { id } => Self::MissingCategory { id },
            StoreError::Database(_) => Self::Database(e),
        }
    }
}
