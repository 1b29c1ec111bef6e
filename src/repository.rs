use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{Todo, UpdateTodoRequest};

/// In-memory todo collection with server-assigned sequential ids.
///
/// Keyed by id in a `BTreeMap`, so list order is ascending id, which equals
/// creation order and stays stable across reloads.
pub struct TodoRepository {
    inner: RwLock<Inner>,
}

struct Inner {
    todos: BTreeMap<u32, Todo>,
    next_id: u32,
}

impl TodoRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                todos: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Starting collection matching the demo data the server has always
    /// shipped with.
    pub fn seeded() -> Self {
        let now = Utc::now().to_rfc3339();
        let mut todos = BTreeMap::new();
        let mut next_id = 1;
        for (title, completed) in [("Learn Rust", false), ("Build an API with axum", true)] {
            todos.insert(
                next_id,
                Todo {
                    id: next_id,
                    title: title.to_string(),
                    completed,
                    created_at: Some(now.clone()),
                    updated_at: Some(now.clone()),
                },
            );
            next_id += 1;
        }
        Self {
            inner: RwLock::new(Inner { todos, next_id }),
        }
    }

    pub async fn list(&self) -> Vec<Todo> {
        self.inner.read().await.todos.values().cloned().collect()
    }

    pub async fn get(&self, id: u32) -> Option<Todo> {
        self.inner.read().await.todos.get(&id).cloned()
    }

    pub async fn insert(&self, title: String) -> Todo {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let now = Utc::now().to_rfc3339();
        let todo = Todo {
            id,
            title,
            completed: false,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        };
        inner.todos.insert(id, todo.clone());
        todo
    }

    /// Applies the provided fields and refreshes `updatedAt`. Returns `None`
    /// when the id is absent.
    pub async fn update(&self, id: u32, req: &UpdateTodoRequest) -> Option<Todo> {
        let mut inner = self.inner.write().await;
        let todo = inner.todos.get_mut(&id)?;

        if let Some(title) = &req.title {
            todo.title = title.clone();
        }
        if let Some(completed) = req.completed {
            todo.completed = completed;
        }
        todo.updated_at = Some(Utc::now().to_rfc3339());

        Some(todo.clone())
    }

    pub async fn remove(&self, id: u32) -> bool {
        self.inner.write().await.todos.remove(&id).is_some()
    }
}

impl Default for TodoRepository {
    fn default() -> Self {
        Self::new()
    }
}
