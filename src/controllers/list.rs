use std::sync::Arc;

use tracing::warn;

use crate::models::{CreateTodoRequest, Todo, UpdateTodoRequest};
use crate::remote::TodoStore;

/// Rename mode: at most one todo is being edited at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: u32,
    pub draft: String,
}

/// State and behavior backing the list page.
///
/// `items` is the authoritative in-memory sequence for as long as the view is
/// mounted, ordered the way the server returned it. Mutations other than
/// create are optimistic; any mutation failure triggers a full reload so the
/// local sequence never permanently diverges from server truth.
pub struct ListController {
    store: Arc<dyn TodoStore>,
    items: Vec<Todo>,
    new_title: String,
    loading: bool,
    error: Option<String>,
    editing: Option<EditState>,
}

impl ListController {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            items: Vec::new(),
            new_title: String::new(),
            loading: true,
            error: None,
            editing: None,
        }
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn new_title(&self) -> &str {
        &self.new_title
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    pub fn set_new_title(&mut self, title: impl Into<String>) {
        self.new_title = title.into();
    }

    pub fn start_editing(&mut self, id: u32) {
        if let Some(todo) = self.items.iter().find(|t| t.id == id) {
            self.editing = Some(EditState {
                id,
                draft: todo.title.clone(),
            });
        }
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        if let Some(editing) = &mut self.editing {
            editing.draft = draft.into();
        }
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    /// Fetches the full collection. On success `items` is replaced and any
    /// stale error cleared; on failure the previous items stay visible.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.store.list().await {
            Ok(todos) => {
                self.items = todos;
                self.error = None;
            }
            Err(e) => {
                warn!("failed to load todos: {e}");
                self.error = Some(format!("Failed to load todos: {e}"));
            }
        }
        self.loading = false;
    }

    /// Submits the creation buffer. Not optimistic: the item only appears
    /// once the server has assigned it an id. An empty (trimmed) buffer sends
    /// nothing.
    pub async fn create(&mut self) {
        if self.new_title.trim().is_empty() {
            return;
        }
        let req = CreateTodoRequest {
            title: self.new_title.clone(),
        };
        match self.store.create(&req).await {
            Ok(todo) => {
                self.items.push(todo);
                self.new_title.clear();
            }
            Err(e) => {
                warn!("failed to create todo: {e}");
                self.error = Some(format!("Failed to add todo: {e}"));
            }
        }
    }

    /// Optimistic flip; a failed update reconciles by reloading instead of
    /// rolling back.
    pub async fn toggle_completed(&mut self, id: u32) {
        let Some(todo) = self.items.iter_mut().find(|t| t.id == id) else {
            return;
        };
        todo.completed = !todo.completed;
        let req = UpdateTodoRequest {
            completed: Some(todo.completed),
            ..Default::default()
        };

        if let Err(e) = self.store.update(id, &req).await {
            warn!("toggle for todo {id} failed, reloading: {e}");
            self.load().await;
        }
    }

    /// Optimistic removal; a failed delete reloads rather than re-inserting.
    pub async fn delete(&mut self, id: u32) {
        self.items.retain(|t| t.id != id);

        if let Err(e) = self.store.delete(id).await {
            warn!("delete for todo {id} failed, reloading: {e}");
            self.load().await;
        }
    }

    /// Optimistic title change that also exits rename mode. An empty
    /// (trimmed) title sends nothing and keeps the edit state.
    pub async fn rename(&mut self, id: u32, new_title: &str) {
        if new_title.trim().is_empty() {
            return;
        }
        if let Some(todo) = self.items.iter_mut().find(|t| t.id == id) {
            todo.title = new_title.to_string();
        }
        self.editing = None;
        let req = UpdateTodoRequest {
            title: Some(new_title.to_string()),
            ..Default::default()
        };

        if let Err(e) = self.store.update(id, &req).await {
            warn!("rename for todo {id} failed, reloading: {e}");
            self.load().await;
        }
    }
}
