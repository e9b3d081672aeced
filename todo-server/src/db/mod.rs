//! Database layer - connection pool, schema bootstrap, and repositories
//!
//! The pool is created once at startup and injected into `PgTodoRepository`.
//! No global handle.

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{connect, create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::{InMemoryTodoRepository, PgTodoRepository, RepoError, TodoRepository};
