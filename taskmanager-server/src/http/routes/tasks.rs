//! Task pages

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;

use crate::http::error::AppError;
use crate::http::extractors::{FormBody, RecordIdPath};
use crate::models::{Category, RecordId, Task, TaskForm};
use crate::state::AppState;
use crate::views;

/// Category entry in the task form's select box
#[derive(Serialize)]
struct CategoryOption {
    id: RecordId,
    name: String,
    selected: bool,
}

fn category_options(categories: Vec<Category>, selected: Option<RecordId>) -> Vec<CategoryOption> {
    categories
        .into_iter()
        .map(|c| CategoryOption {
            selected: Some(c.id) == selected,
            id: c.id,
            name: c.name,
        })
        .collect()
}

/// Render the edit form for a task with every category to choose from.
async fn render_edit_form(state: &AppState, task: Task) -> Result<Html<String>, AppError> {
    let categories = state.store().list_categories().await?;
    let options = category_options(categories, Some(task.category_id));
    Ok(Html(views::render(
        "edit_task",
        &json!({ "task": task, "categories": options }),
    )?))
}

/// GET / - list tasks by id
async fn list_tasks(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let tasks = state.store().list_tasks().await?;
    Ok(Html(views::render("tasks", &json!({ "tasks": tasks }))?))
}

/// GET /add_task - empty form listing all categories
async fn add_task_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let categories = state.store().list_categories().await?;
    Ok(Html(views::render(
        "add_task",
        &json!({ "categories": category_options(categories, None) }),
    )?))
}

/// POST /add_task - create and return to the task list
async fn add_task(
    State(state): State<AppState>,
    FormBody(form): FormBody<TaskForm>,
) -> Result<Redirect, AppError> {
    let task = form.validate()?;
    state.store().create_task(task).await?;
    Ok(Redirect::to("/"))
}

/// GET /edit_task/{id} - pre-filled form
async fn edit_task_form(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> Result<Html<String>, AppError> {
    let task = state.store().get_task(id).await?;
    render_edit_form(&state, task).await
}

/// POST /edit_task/{id} - replace every field and show the form again
async fn edit_task(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
    FormBody(form): FormBody<TaskForm>,
) -> Result<Html<String>, AppError> {
    // Unknown ids are reported before validation errors
    state.store().get_task(id).await?;
    let task = form.validate()?;
    let updated = state.store().update_task(id, task).await?;
    render_edit_form(&state, updated).await
}

/// GET /delete_task/{id} - delete and return to the task list
async fn delete_task(
    State(state): State<AppState>,
    RecordIdPath(id): RecordIdPath,
) -> Result<Redirect, AppError> {
    state.store().delete_task(id).await?;
    tracing::info!(id, "Deleted task");
    Ok(Redirect::to("/"))
}

/// Task routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks))
        .route("/add_task", get(add_task_form).post(add_task))
        .route("/edit_task/{id}", get(edit_task_form).post(edit_task))
        .route("/delete_task/{id}", get(delete_task))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_matching_category_is_selected() {
        let categories = vec![
            Category {
                id: 1,
                name: "Errands".into(),
            },
            Category {
                id: 2,
                name: "Home".into(),
            },
        ];

        let options = category_options(categories, Some(2));
        let selected: Vec<RecordId> = options.iter().filter(|o| o.selected).map(|o| o.id).collect();
        assert_eq!(selected, [2]);
    }
}
