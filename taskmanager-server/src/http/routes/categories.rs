//! Category pages

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::get,
    Router,
};
use serde_json::json;

use crate::http::error::AppError;
use crate::http::extractors::{FormBody, RecordIdPath};
use crate::models::CategoryForm;
use crate::state::AppState;
use crate::views;

/// GET /categories - list categories by name
async fn list_categories(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let categories = state.store().list_categories().await?;
    Ok(Html(views::render(
        "categories",
        &json!({ "categories": categories }),
    )?))
}

/// GET /add_category - empty form
async fn add_category_form() -> Result<Html<String>, AppError> {
    Ok(Html(views::render("add_category", &json!({}))?))
}

/// POST /add_category - create and return to the list
async fn add_category(
    State(state): State<AppState>,
    FormBody(form): FormBody<CategoryForm>,
) -> Result<Redirect, AppError> {
    let category = form.validate()?;
    state.store().create_category(category).await?;
    Ok(Redirect::to("/categories"))
}

/// GET /edit_category/{id} - pre-filled form
async fn edit_category_form(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> Result<Html<String>, AppError> {
    let category = state.store().get_category(id).await?;
    Ok(Html(views::render(
        "edit_category",
        &json!({ "category": category }),
    )?))
}

/// POST /edit_category/{id} - replace and return to the list
async fn edit_category(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
    FormBody(form): FormBody<CategoryForm>,
) -> Result<Redirect, AppError> {
    // Unknown ids are reported before validation errors
    state.store().get_category(id).await?;
    let category = form.validate()?;
    state.store().update_category(id, category).await?;
    Ok(Redirect::to("/categories"))
}

/// GET /delete_category/{id} - delete with its tasks
async fn delete_category(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> Result<Redirect, AppError> {
    let tasks_removed = state.store().delete_category(id).await?;
    tracing::info!(id, tasks_removed, "Deleted category");
    Ok(Redirect::to("/categories"))
}

/// Category routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/add_category", get(add_category_form).post(add_category))
        .route(
            "/edit_category/{id}",
            get(edit_category_form).post(edit_category),
        )
        .route("/delete_category/{id}", get(delete_category))
}
