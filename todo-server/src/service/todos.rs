//! Todo use cases
//!
//! Each operation takes one deadline (`now + timeout`) and bounds every
//! repository call with it. Storage failures are collapsed into a single
//! `AppError` per operation; the underlying cause is logged and dropped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{timeout_at, Instant};

use crate::db::repos::{RepoError, TodoRepository};
use crate::error::{AppError, ServiceResult};
use crate::models::{NewTodo, Todo};

/// Default bound for a single use-case operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

pub const TODO_NOT_FOUND: &str = "Todo not found.";
pub const EMPTY_TITLE: &str = "Title cannot be empty or null.";
pub const CREATE_FAILED: &str = "Failed to create todo.";
pub const UPDATE_FAILED: &str = "Failed to update todo.";
pub const DELETE_FAILED: &str = "Failed to delete todo.";

/// Business rules over a `TodoRepository`
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
    timeout: Duration,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn deadline(&self) -> Instant {
        Instant::now() + self.timeout
    }

    /// Run `op` until `deadline`; an elapsed deadline drops the future.
    async fn bounded<T>(
        &self,
        deadline: Instant,
        op: impl Future<Output = Result<T, RepoError>>,
    ) -> Result<T, RepoError> {
        timeout_at(deadline, op)
            .await
            .unwrap_or(Err(RepoError::Timeout(self.timeout)))
    }

    /// Look up an existing todo. Any failure, absence or otherwise, is NotFound.
    async fn find(&self, deadline: Instant, id: i64) -> Result<Todo, AppError> {
        self.bounded(deadline, self.repo.get_by_id(id))
            .await
            .map_err(|e| {
                tracing::warn!(todo_id = id, error = %e, "todo lookup failed");
                AppError::not_found(TODO_NOT_FOUND)
            })
    }

    /// All todos, newest first. Storage errors pass through untranslated.
    pub async fn list_todos(&self) -> ServiceResult<Vec<Todo>> {
        let deadline = self.deadline();
        let todos = self.bounded(deadline, self.repo.get_all()).await?;
        tracing::debug!(count = todos.len(), "listed todos");
        Ok(todos)
    }

    pub async fn get_todo(&self, id: i64) -> ServiceResult<Todo> {
        let deadline = self.deadline();
        Ok(self.find(deadline, id).await?)
    }

    pub async fn create_todo(&self, title: &str, description: &str) -> ServiceResult<Todo> {
        let deadline = self.deadline();

        if title.is_empty() {
            return Err(AppError::bad_request(EMPTY_TITLE).into());
        }

        let draft = NewTodo::new(title, description, Utc::now());
        let todo = self
            .bounded(deadline, self.repo.create(draft))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to persist new todo");
                AppError::internal(CREATE_FAILED)
            })?;

        tracing::debug!(todo_id = todo.id, "created todo");
        Ok(todo)
    }

    /// Partial update: empty `title`/`description` keep the stored value,
    /// `completed` always replaces it.
    pub async fn update_todo(
        &self,
        id: i64,
        title: &str,
        description: &str,
        completed: bool,
    ) -> ServiceResult<Todo> {
        let deadline = self.deadline();

        let mut todo = self.find(deadline, id).await?;
        todo.apply_update(title, description, completed, Utc::now());

        self.bounded(deadline, self.repo.update(&todo))
            .await
            .map_err(|e| {
                tracing::error!(todo_id = id, error = %e, "failed to persist todo update");
                AppError::internal(UPDATE_FAILED)
            })?;

        tracing::debug!(todo_id = id, "updated todo");
        Ok(todo)
    }

    pub async fn delete_todo(&self, id: i64) -> ServiceResult<()> {
        let deadline = self.deadline();

        self.find(deadline, id).await?;

        self.bounded(deadline, self.repo.delete(id))
            .await
            .map_err(|e| {
                tracing::error!(todo_id = id, error = %e, "failed to delete todo");
                AppError::internal(DELETE_FAILED)
            })?;

        tracing::debug!(todo_id = id, "deleted todo");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::InMemoryTodoRepository;
    use crate::error::ServiceError;

    fn service() -> (Arc<InMemoryTodoRepository>, TodoService) {
        let repo = Arc::new(InMemoryTodoRepository::new());
        let service = TodoService::new(repo.clone(), DEFAULT_TIMEOUT);
        (repo, service)
    }

    fn app_error(err: ServiceError) -> AppError {
        match err {
            ServiceError::App(e) => e,
            ServiceError::Store(e) => panic!("expected app error, got store error: {e}"),
        }
    }

    #[tokio::test]
    async fn create_opens_todo_with_equal_timestamps() {
        let (_, service) = service();
        let todo = service.create_todo("Buy milk", "").await.unwrap();

        assert_eq!(todo.id, 1);
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
        assert_eq!(todo.created_at.timestamp_subsec_nanos() % 1000, 0);
    }

    #[tokio::test]
    async fn create_rejects_empty_title_without_persisting() {
        let (repo, service) = service();
        let err = app_error(service.create_todo("", "desc").await.unwrap_err());

        assert_eq!(err, AppError::bad_request(EMPTY_TITLE));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn create_failure_is_internal() {
        let (repo, service) = service();
        repo.set_fail_writes(true);

        let err = app_error(service.create_todo("Buy milk", "").await.unwrap_err());
        assert_eq!(err, AppError::internal(CREATE_FAILED));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let (_, service) = service();
        let expected = AppError::not_found(TODO_NOT_FOUND);

        assert_eq!(app_error(service.get_todo(99).await.unwrap_err()), expected);
        assert_eq!(
            app_error(service.update_todo(99, "t", "d", true).await.unwrap_err()),
            expected
        );
        assert_eq!(app_error(service.delete_todo(99).await.unwrap_err()), expected);
    }

    #[tokio::test]
    async fn update_keeps_fields_for_empty_input() {
        let (_, service) = service();
        let created = service.create_todo("Buy milk", "whole").await.unwrap();

        let updated = service.update_todo(created.id, "", "", true).await.unwrap();
        assert_eq!(updated.title, "Buy milk");
        assert_eq!(updated.description, "whole");
        assert!(updated.completed);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);

        assert_eq!(updated.updated_at.timestamp_subsec_nanos() % 1000, 0);

        let stored = service.get_todo(created.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_always_overwrites_completed() {
        let (_, service) = service();
        let created = service.create_todo("Buy milk", "").await.unwrap();
        service.update_todo(created.id, "", "", true).await.unwrap();

        let reopened = service
            .update_todo(created.id, "Buy oat milk", "", false)
            .await
            .unwrap();
        assert_eq!(reopened.title, "Buy oat milk");
        assert!(!reopened.completed);
    }

    #[tokio::test]
    async fn update_failure_is_internal() {
        let (repo, service) = service();
        let created = service.create_todo("Buy milk", "").await.unwrap();
        repo.set_fail_writes(true);

        let err = app_error(service.update_todo(created.id, "", "", true).await.unwrap_err());
        assert_eq!(err, AppError::internal(UPDATE_FAILED));
    }

    #[tokio::test]
    async fn delete_removes_todo() {
        let (repo, service) = service();
        let created = service.create_todo("Buy milk", "").await.unwrap();

        service.delete_todo(created.id).await.unwrap();
        assert!(repo.is_empty());
        assert_eq!(
            app_error(service.get_todo(created.id).await.unwrap_err()),
            AppError::not_found(TODO_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn delete_failure_is_internal() {
        let (repo, service) = service();
        let created = service.create_todo("Buy milk", "").await.unwrap();
        repo.set_fail_writes(true);

        let err = app_error(service.delete_todo(created.id).await.unwrap_err());
        assert_eq!(err, AppError::internal(DELETE_FAILED));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let (_, service) = service();
        for title in ["A", "B", "C"] {
            service.create_todo(title, "").await.unwrap();
        }

        let titles: Vec<_> = service
            .list_todos()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn list_of_empty_store_is_empty() {
        let (_, service) = service();
        assert!(service.list_todos().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_hits_the_deadline() {
        let repo = Arc::new(InMemoryTodoRepository::with_latency(Duration::from_secs(10)));
        let service = TodoService::new(repo.clone(), Duration::from_secs(1));

        let err = service.list_todos().await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(RepoError::Timeout(_))));

        assert_eq!(
            app_error(service.get_todo(1).await.unwrap_err()),
            AppError::not_found(TODO_NOT_FOUND)
        );
        assert_eq!(
            app_error(service.create_todo("Buy milk", "").await.unwrap_err()),
            AppError::internal(CREATE_FAILED)
        );
        assert!(repo.is_empty());
    }
}
