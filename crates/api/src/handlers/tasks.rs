use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use taskcache_domain::{Task, TaskList};
use tracing::{debug, instrument};

use crate::{dto::TaskForm, errors::ApiError, state::AppState};

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

#[instrument(skip(state), name = "api_list_todos")]
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<TaskList>, ApiError> {
    let tasks = state.storage.list().await?;
    debug!(count = tasks.len(), "Todos retrieved successfully");
    Ok(Json(tasks))
}

#[instrument(skip(state), name = "api_get_todo")]
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    let task = state
        .storage
        .read(id)
        .await
        .map_err(|e| ApiError::for_task(e, id))?;
    Ok(Json(task))
}

#[instrument(skip(state, form), name = "api_create_todo")]
pub async fn create_task(
    State(state): State<AppState>,
    form: TaskForm,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state
        .storage
        .create(Task::new(form.title, form.complete))
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[instrument(skip(state, form), name = "api_update_todo")]
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: TaskForm,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    let task = state
        .storage
        .update(Task::for_update(id, form.title, form.complete))
        .await
        .map_err(|e| ApiError::for_task(e, id))?;
    Ok(Json(task))
}

#[instrument(skip(state), name = "api_delete_todo")]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state
        .storage
        .delete(id)
        .await
        .map_err(|e| ApiError::for_task(e, id))?;
    Ok(StatusCode::NO_CONTENT)
}
