//! Use-case layer between the HTTP handlers and the repositories

pub mod todos;

pub use todos::{TodoService, DEFAULT_TIMEOUT};
