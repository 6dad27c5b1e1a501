use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use serde::Deserialize;
use service::task::domain::{CreateTaskInput, Task, UpdateTaskInput};
use tracing::info;

use super::TaskState;
use crate::errors::JsonApiError;

const NOT_FOUND: &str = "Task not found";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// Owner id, defaults to 1.
    #[serde(rename = "userId")]
    pub user_id: Option<i32>,
}

#[utoipa::path(get, path = "/", tag = "tasks", responses((status = 200, description = "Liveness message")))]
pub async fn index() -> Json<Message> {
    Json(Message::new("Task Service is running"))
}

#[utoipa::path(
    get, path = "/tasks", tag = "tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "Tasks of the user", body = [crate::openapi::TaskDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<TaskState>, Query(q): Query<ListTasksQuery>) -> Result<Json<Vec<Task>>, JsonApiError> {
    let tasks = state.tasks.list(q.user_id).await.map_err(|e| JsonApiError::from_service(e, NOT_FOUND, "List Failed"))?;
    info!(user_id = ?q.user_id, count = tasks.len(), "list tasks");
    Ok(Json(tasks))
}

#[utoipa::path(
    get, path = "/tasks/{id}", tag = "tasks",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::TaskDoc),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get(State(state): State<TaskState>, Path(id): Path<i32>) -> Result<Json<Task>, JsonApiError> {
    let task = state.tasks.get(id).await.map_err(|e| JsonApiError::from_service(e, NOT_FOUND, "Get Failed"))?;
    Ok(Json(task))
}

#[utoipa::path(
    post, path = "/tasks", tag = "tasks",
    request_body = crate::openapi::CreateTaskDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TaskDoc),
        (status = 400, description = "Validation Error"),
        (status = 422, description = "Malformed body"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(State(state): State<TaskState>, Json(input): Json<CreateTaskInput>) -> Result<(StatusCode, Json<Task>), JsonApiError> {
    let task = state.tasks.create(input).await.map_err(|e| JsonApiError::from_service(e, NOT_FOUND, "Create Failed"))?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    put, path = "/tasks/{id}", tag = "tasks",
    params(("id" = i32, Path, description = "Task id")),
    request_body = crate::openapi::UpdateTaskDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::TaskDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(State(state): State<TaskState>, Path(id): Path<i32>, Json(input): Json<UpdateTaskInput>) -> Result<Json<Task>, JsonApiError> {
    let task = state.tasks.update(id, input).await.map_err(|e| JsonApiError::from_service(e, NOT_FOUND, "Update Failed"))?;
    Ok(Json(task))
}

#[utoipa::path(
    delete, path = "/tasks/{id}", tag = "tasks",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<TaskState>, Path(id): Path<i32>) -> Result<Json<Message>, JsonApiError> {
    state.tasks.delete(id).await.map_err(|e| JsonApiError::from_service(e, NOT_FOUND, "Delete Failed"))?;
    Ok(Json(Message::new("Task deleted")))
}
