//! Repository trait and implementations for todo storage
//!
//! - `PgTodoRepository`: PostgreSQL via sqlx, the production store
//! - `InMemoryTodoRepository`: test double with latency/failure injection

pub mod memory;
pub mod todos;

use std::time::Duration;

use async_trait::async_trait;

use crate::models::{NewTodo, Todo};

pub use memory::InMemoryTodoRepository;
pub use todos::PgTodoRepository;

/// Storage-layer error, not yet translated for clients
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("todo {id} not found")]
    NotFound { id: i64 },

    #[error("no rows affected for todo {id}")]
    NoRowsAffected { id: i64 },

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Data access for todos.
///
/// Callers bound each call with a deadline; dropping the returned future
/// aborts the in-flight statement.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos, newest first. Empty store yields an empty vec.
    async fn get_all(&self) -> Result<Vec<Todo>, RepoError>;

    async fn get_by_id(&self, id: i64) -> Result<Todo, RepoError>;

    /// Insert and return the record with its generated id.
    async fn create(&self, todo: NewTodo) -> Result<Todo, RepoError>;

    /// Overwrite title, description, completed and updated_at.
    async fn update(&self, todo: &Todo) -> Result<(), RepoError>;

    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}
