//! Todo endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, ServiceError};
use crate::http::extractors::{JsonBody, TodoId, INVALID_ID};
use crate::http::server::AppState;
use crate::models::Todo;

/// Missing and `null` fields both decode to the zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Create todo request. Missing or null fields decode as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTodoRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

/// Update todo request. Empty strings mean "leave unchanged".
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTodoRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: bool,
}

/// GET /todos - all todos, newest first
async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Todo>>, ServiceError> {
    let todos = state.todos.list_todos().await?;
    Ok(Json(todos))
}

/// GET /todos/{id}
async fn get_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, ServiceError> {
    let todo = state.todos.get_todo(id).await?;
    Ok(Json(todo))
}

/// POST /todos
async fn create_todo(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ServiceError> {
    let todo = state.todos.create_todo(&req.title, &req.description).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /todos/{id}
async fn update_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    JsonBody(req): JsonBody<UpdateTodoRequest>,
) -> Result<Json<Todo>, ServiceError> {
    let todo = state
        .todos
        .update_todo(id, &req.title, &req.description, req.completed)
        .await?;
    Ok(Json(todo))
}

/// DELETE /todos/{id}
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<StatusCode, ServiceError> {
    state.todos.delete_todo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// /todos/ and /todos/{id}/... carry no usable id
async fn malformed_id() -> AppError {
    AppError::bad_request(INVALID_ID)
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/", any(malformed_id))
        .route("/todos/{id}/{*rest}", any(malformed_id))
}
