//! Todo record

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// `TIMESTAMPTZ` keeps microseconds; drop the rest so returned records match
/// what a later read yields.
fn to_store_precision(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(6)
}

/// A persisted todo. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A todo that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTodo {
    /// Open todo stamped with `now` for both timestamps.
    pub fn new(title: impl Into<String>, description: impl Into<String>, now: DateTime<Utc>) -> Self {
        let now = to_store_precision(now);
        Self {
            title: title.into(),
            description: description.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the id the store generated.
    pub fn with_id(self, id: i64) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Todo {
    /// Apply an update: empty strings leave the field alone, `completed` is
    /// always overwritten. `updated_at` never moves backwards.
    pub fn apply_update(&mut self, title: &str, description: &str, completed: bool, now: DateTime<Utc>) {
        if !title.is_empty() {
            self.title = title.to_owned();
        }
        if !description.is_empty() {
            self.description = description.to_owned();
        }
        self.completed = completed;
        self.updated_at = to_store_precision(now).max(self.updated_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Todo {
        NewTodo::new("Buy milk", "whole", Utc::now()).with_id(7)
    }

    #[test]
    fn new_todo_is_open_with_equal_timestamps() {
        let now = Utc::now();
        let todo = NewTodo::new("Buy milk", "", now);
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn empty_fields_are_left_unchanged() {
        let mut todo = sample();
        let later = todo.updated_at + Duration::seconds(5);
        todo.apply_update("", "", true, later);

        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, "whole");
        assert!(todo.completed);
        assert_eq!(todo.updated_at, later);
    }

    #[test]
    fn timestamps_keep_microsecond_precision() {
        let now = Utc::now();
        let mut todo = NewTodo::new("Buy milk", "", now).with_id(1);
        assert_eq!(todo.created_at.timestamp_subsec_nanos() % 1000, 0);
        assert_eq!(todo.created_at.timestamp_micros(), now.timestamp_micros());

        todo.apply_update("", "", true, now + Duration::nanoseconds(1_500_777));
        assert_eq!(todo.updated_at.timestamp_subsec_nanos() % 1000, 0);
    }

    #[test]
    fn updated_at_does_not_go_backwards() {
        let mut todo = sample();
        let earlier = todo.created_at - Duration::seconds(30);
        todo.apply_update("", "", true, earlier);

        assert!(todo.completed);
        assert_eq!(todo.updated_at, todo.created_at);
        assert!(todo.created_at <= todo.updated_at);
    }

    #[test]
    fn completed_is_always_overwritten() {
        let mut todo = sample();
        todo.completed = true;
        let now = Utc::now();
        todo.apply_update("Buy oat milk", "", false, now);

        assert_eq!(todo.title, "Buy oat milk");
        assert!(!todo.completed);
    }

    #[test]
    fn serializes_snake_case_fields() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["completed"], false);
        assert!(value.get("created_at").is_some());
        assert!(value.get("updated_at").is_some());
    }
}
