//! In-memory todo repository for tests
//!
//! Mirrors the PostgreSQL repository's contract. Latency and write failures
//! can be injected to exercise timeout and error paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::{RepoError, TodoRepository};
use crate::models::{NewTodo, Todo};

#[derive(Default)]
struct Rows {
    next_id: i64,
    todos: Vec<Todo>,
}

/// Mock repository holding todos in a vec
#[derive(Default)]
pub struct InMemoryTodoRepository {
    rows: Mutex<Rows>,
    latency: Option<Duration>,
    fail_writes: AtomicBool,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `latency` before touching the rows.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Make create/update/delete fail with a database error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> MutexGuard<'_, Rows> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate(&self, write: bool) -> Result<(), RepoError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if write && self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepoError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn get_all(&self) -> Result<Vec<Todo>, RepoError> {
        self.simulate(false).await?;
        let mut todos = self.rows().todos.clone();
        todos.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(todos)
    }

    async fn get_by_id(&self, id: i64) -> Result<Todo, RepoError> {
        self.simulate(false).await?;
        self.rows()
            .todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(RepoError::NotFound { id })
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, RepoError> {
        self.simulate(true).await?;
        let mut rows = self.rows();
        rows.next_id += 1;
        let todo = todo.with_id(rows.next_id);
        rows.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, todo: &Todo) -> Result<(), RepoError> {
        self.simulate(true).await?;
        let mut rows = self.rows();
        let existing = rows
            .todos
            .iter_mut()
            .find(|t| t.id == todo.id)
            .ok_or(RepoError::NoRowsAffected { id: todo.id })?;

        existing.title.clone_from(&todo.title);
        existing.description.clone_from(&todo.description);
        existing.completed = todo.completed;
        existing.updated_at = todo.updated_at;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.simulate(true).await?;
        let mut rows = self.rows();
        let before = rows.todos.len();
        rows.todos.retain(|t| t.id != id);
        if rows.todos.len() == before {
            return Err(RepoError::NoRowsAffected { id });
        }
        Ok(())
    }
}
