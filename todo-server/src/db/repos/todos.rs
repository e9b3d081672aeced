//! PostgreSQL todo repository
//!
//! One parameterized statement per operation. update/delete report a missing
//! row as `NoRowsAffected`, separate from query failures.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{RepoError, TodoRepository};
use crate::models::{NewTodo, Todo};

/// Todo repository backed by a shared connection pool
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn get_all(&self) -> Result<Vec<Todo>, RepoError> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM todos
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to query todos"))?;

        Ok(todos)
    }

    async fn get_by_id(&self, id: i64) -> Result<Todo, RepoError> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(todo_id = id, error = %e, "failed to query todo"))?
        .ok_or(RepoError::NotFound { id })
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, RepoError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO todos (title, description, completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .fetch_one(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to create todo"))?;

        Ok(todo.with_id(id))
    }

    async fn update(&self, todo: &Todo) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = $1, description = $2, completed = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.updated_at)
        .bind(todo.id)
        .execute(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(todo_id = todo.id, error = %e, "failed to update todo"))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NoRowsAffected { id: todo.id });
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .inspect_err(|e| tracing::error!(todo_id = id, error = %e, "failed to delete todo"))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NoRowsAffected { id });
        }
        Ok(())
    }
}
