//! todo-server: HTTP API for todo records
//!
//! Layered as handler → use case → repository:
//! - `http` decodes requests and renders responses
//! - `service` validates input, stamps timestamps, bounds every call with a deadline
//! - `db` talks to PostgreSQL through the `TodoRepository` trait

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod service;

pub use config::DatabaseConfig;
pub use error::{AppError, ServiceError};
pub use http::{run_server, ServerConfig, ServerError};
pub use models::{NewTodo, Todo};
pub use service::TodoService;
