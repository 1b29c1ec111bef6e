use std::sync::Arc;

use tracing::warn;

use crate::models::{Todo, UpdateTodoRequest};
use crate::remote::TodoStore;

/// State and behavior backing the detail page for one todo.
///
/// There is no single-item fetch in the client contract, so load pulls the
/// whole collection and scans for the id. Mutations follow the same
/// optimistic-then-reload-on-failure discipline as the list view; keeping the
/// two policies identical was chosen over the alternative of leaving the
/// optimistic state in place behind an error banner.
pub struct DetailController {
    store: Arc<dyn TodoStore>,
    id: u32,
    todo: Option<Todo>,
    loading: bool,
    error: Option<String>,
    edit_mode: bool,
    edit_title: String,
    deleted: bool,
}

impl DetailController {
    pub fn new(store: Arc<dyn TodoStore>, id: u32) -> Self {
        Self {
            store,
            id,
            todo: None,
            loading: true,
            error: None,
            edit_mode: false,
            edit_title: String::new(),
            deleted: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn todo(&self) -> Option<&Todo> {
        self.todo.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn edit_title(&self) -> &str {
        &self.edit_title
    }

    /// Set on successful delete; the view navigates back to the list root.
    pub fn deleted(&self) -> bool {
        self.deleted
    }

    pub fn enter_edit_mode(&mut self) {
        self.edit_mode = true;
    }

    pub fn cancel_edit(&mut self) {
        self.edit_mode = false;
        if let Some(todo) = &self.todo {
            self.edit_title = todo.title.clone();
        }
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        self.edit_title = title.into();
    }

    /// Fetches the entire collection and scans for the held id. Both
    /// not-found and transport failure are blocking error states: the view
    /// cannot render without a loaded todo.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.store.list().await {
            Ok(todos) => match todos.into_iter().find(|t| t.id == self.id) {
                Some(todo) => {
                    self.edit_title = todo.title.clone();
                    self.todo = Some(todo);
                    self.error = None;
                }
                None => {
                    self.todo = None;
                    self.error = Some(format!("Todo with id {} not found", self.id));
                }
            },
            Err(e) => {
                warn!("failed to load todo {}: {e}", self.id);
                self.error = Some(format!("Failed to load todo: {e}"));
            }
        }
        self.loading = false;
    }

    pub async fn toggle_completed(&mut self) {
        let Some(todo) = self.todo.as_mut() else {
            return;
        };
        todo.completed = !todo.completed;
        let req = UpdateTodoRequest {
            completed: Some(todo.completed),
            ..Default::default()
        };

        if let Err(e) = self.store.update(self.id, &req).await {
            warn!("toggle for todo {} failed, reloading: {e}", self.id);
            self.load().await;
        }
    }

    /// Commits the edit buffer as the new title. An empty (trimmed) buffer
    /// sends nothing and stays in edit mode.
    pub async fn rename(&mut self) {
        if self.todo.is_none() || self.edit_title.trim().is_empty() {
            return;
        }
        let new_title = self.edit_title.clone();
        if let Some(todo) = self.todo.as_mut() {
            todo.title = new_title.clone();
        }
        self.edit_mode = false;
        let req = UpdateTodoRequest {
            title: Some(new_title),
            ..Default::default()
        };

        if let Err(e) = self.store.update(self.id, &req).await {
            warn!("rename for todo {} failed, reloading: {e}", self.id);
            self.load().await;
        }
    }

    pub async fn delete(&mut self) {
        match self.store.delete(self.id).await {
            Ok(()) => self.deleted = true,
            Err(e) => {
                warn!("delete for todo {} failed, reloading: {e}", self.id);
                self.load().await;
            }
        }
    }
}
