//! Domain types — the todo entity and the store seam.
//!
//! [`TodoStore`] is the boundary between the service layer and persistence.
//! The production implementation is SQLite-backed (`crate::storage`); tests
//! substitute an in-memory mock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// UUID v4, assigned at creation.
    pub id: String,
    pub title: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persistence seam for todos.
pub trait TodoStore: Send + Sync {
    /// All todos, newest first.
    fn list(&self) -> Result<Vec<Todo>, AppError>;

    /// A single todo, or `None` when the id is unknown.
    fn get(&self, id: &str) -> Result<Option<Todo>, AppError>;

    /// Insert a new todo with a fresh id and both timestamps stamped.
    fn create(&self, title: &str) -> Result<Todo, AppError>;

    /// Overwrite title and completion state; `None` when the id is unknown.
    /// Refreshes `updated_at`.
    fn update(&self, id: &str, title: &str, is_completed: bool)
        -> Result<Option<Todo>, AppError>;

    /// Remove a todo. Succeeds whether or not the id exists.
    fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn todo_serializes_with_snake_case_fields() {
        let todo = Todo {
            id: "abc".into(),
            title: "write tests".into(),
            is_completed: false,
            created_at: Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["is_completed"], false);
        assert!(json["created_at"].as_str().unwrap().starts_with("2025-04-01T12:00:00"));
    }
}
