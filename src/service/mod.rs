//! Todo service layer — business rules between the HTTP handlers and the store.

use std::sync::Arc;

use crate::domain::{Todo, TodoStore};
use crate::error::AppError;

/// Service facade over a [`TodoStore`].
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// All todos, newest first.
    pub fn list(&self) -> Result<Vec<Todo>, AppError> {
        self.store.list()
    }

    /// Create a new todo with the given title.
    /// Title validity is checked at the HTTP boundary.
    pub fn create(&self, title: &str) -> Result<Todo, AppError> {
        self.store.create(title)
    }

    /// Flip the completion state of a todo, preserving its title.
    /// Returns `None` when the id is unknown.
    pub fn set_completed(
        &self,
        id: &str,
        is_completed: bool,
    ) -> Result<Option<Todo>, AppError> {
        // Read the existing row first so the title survives the update.
        let Some(existing) = self.store.get(id)? else {
            return Ok(None);
        };
        self.store.update(id, &existing.title, is_completed)
    }

    /// Delete a todo by id. Unknown ids are not an error.
    pub fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    /// In-memory [`TodoStore`] with per-operation error injection.
    #[derive(Default)]
    struct MockStore {
        todos: Mutex<HashMap<String, Todo>>,
        list_err: Option<String>,
        get_err: Option<String>,
        create_err: Option<String>,
        update_err: Option<String>,
        delete_err: Option<String>,
    }

    impl MockStore {
        fn with_todo(id: &str, title: &str) -> Self {
            let store = Self::default();
            let now = Utc::now();
            store.todos.lock().unwrap().insert(
                id.to_string(),
                Todo {
                    id: id.to_string(),
                    title: title.to_string(),
                    is_completed: false,
                    created_at: now,
                    updated_at: now,
                },
            );
            store
        }
    }

    impl TodoStore for MockStore {
        fn list(&self) -> Result<Vec<Todo>, AppError> {
            if let Some(msg) = &self.list_err {
                return Err(AppError::Storage(msg.clone()));
            }
            Ok(self.todos.lock().unwrap().values().cloned().collect())
        }

        fn get(&self, id: &str) -> Result<Option<Todo>, AppError> {
            if let Some(msg) = &self.get_err {
                return Err(AppError::Storage(msg.clone()));
            }
            Ok(self.todos.lock().unwrap().get(id).cloned())
        }

        fn create(&self, title: &str) -> Result<Todo, AppError> {
            if let Some(msg) = &self.create_err {
                return Err(AppError::Storage(msg.clone()));
            }
            let now = Utc::now();
            let todo = Todo {
                id: "test-id".to_string(),
                title: title.to_string(),
                is_completed: false,
                created_at: now,
                updated_at: now,
            };
            self.todos
                .lock()
                .unwrap()
                .insert(todo.id.clone(), todo.clone());
            Ok(todo)
        }

        fn update(
            &self,
            id: &str,
            title: &str,
            is_completed: bool,
        ) -> Result<Option<Todo>, AppError> {
            if let Some(msg) = &self.update_err {
                return Err(AppError::Storage(msg.clone()));
            }
            let mut todos = self.todos.lock().unwrap();
            let Some(todo) = todos.get_mut(id) else {
                return Ok(None);
            };
            todo.title = title.to_string();
            todo.is_completed = is_completed;
            todo.updated_at = Utc::now();
            Ok(Some(todo.clone()))
        }

        fn delete(&self, id: &str) -> Result<(), AppError> {
            if let Some(msg) = &self.delete_err {
                return Err(AppError::Storage(msg.clone()));
            }
            self.todos.lock().unwrap().remove(id);
            Ok(())
        }
    }

    fn service(store: MockStore) -> TodoService {
        TodoService::new(Arc::new(store))
    }

    #[test]
    fn list_delegates_to_store() {
        let svc = service(MockStore::with_todo("t1", "hello"));
        let todos = svc.list().unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "hello");
    }

    #[test]
    fn list_error_propagates() {
        let svc = service(MockStore {
            list_err: Some("db down".into()),
            ..Default::default()
        });
        let err = svc.list().unwrap_err();
        assert!(err.to_string().contains("db down"));
    }

    #[test]
    fn create_delegates_to_store() {
        let svc = service(MockStore::default());
        let todo = svc.create("new task").unwrap();
        assert_eq!(todo.title, "new task");
        assert!(!todo.is_completed);
    }

    #[test]
    fn set_completed_preserves_title() {
        let svc = service(MockStore::with_todo("t1", "keep me"));
        let updated = svc.set_completed("t1", true).unwrap().unwrap();
        assert_eq!(updated.title, "keep me");
        assert!(updated.is_completed);
    }

    #[test]
    fn set_completed_unknown_id_is_none() {
        let svc = service(MockStore::default());
        assert!(svc.set_completed("missing", true).unwrap().is_none());
    }

    #[test]
    fn set_completed_get_error_propagates() {
        let svc = service(MockStore {
            get_err: Some("read failed".into()),
            ..Default::default()
        });
        let err = svc.set_completed("t1", true).unwrap_err();
        assert!(err.to_string().contains("read failed"));
    }

    #[test]
    fn set_completed_update_error_propagates() {
        let mut store = MockStore::with_todo("t1", "x");
        store.update_err = Some("write failed".into());
        let svc = service(store);
        let err = svc.set_completed("t1", true).unwrap_err();
        assert!(err.to_string().contains("write failed"));
    }

    #[test]
    fn delete_delegates_to_store() {
        let svc = service(MockStore::with_todo("t1", "gone soon"));
        svc.delete("t1").unwrap();
        assert!(svc.list().unwrap().is_empty());
    }
}
