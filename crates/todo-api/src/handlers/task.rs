use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use todo_core::{Error, NewTask, Task, TaskUpdate};

use super::MessageResponse;
use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: String,
}

/// Create a task
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let Json(new_task) = payload?;

    let task = state.store.create(new_task).await?;
    tracing::info!("Created task: {} ({})", task.title, task.id);

    Ok(Json(task_to_response(&task)))
}

/// List all tasks
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state.store.get_all().await?;
    Ok(Json(tasks.iter().map(task_to_response).collect()))
}

/// Get a specific task
pub async fn get_task(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let Path(task_id) = path?;

    let task = state
        .store
        .get_by_id(task_id)
        .await?
        .ok_or(Error::TaskNotFound(task_id))?;

    Ok(Json(task_to_response(&task)))
}

/// Update a task. Only the supplied fields change.
pub async fn update_task(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaskUpdate>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let Path(task_id) = path?;
    let Json(changes) = payload?;

    let task = state
        .store
        .update(task_id, changes)
        .await?
        .ok_or(Error::TaskNotFound(task_id))?;

    Ok(Json(task_to_response(&task)))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(task_id) = path?;

    if !state.store.delete(task_id).await? {
        return Err(Error::TaskNotFound(task_id).into());
    }
    tracing::info!("Deleted task {}", task_id);

    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

pub fn task_to_response(task: &Task) -> TaskResponse {
    TaskResponse {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        completed: task.completed,
        created_at: task.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
