use std::sync::Arc;

use crate::repository::TodoRepository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<TodoRepository>,
}

impl AppState {
    pub fn new(repo: TodoRepository) -> Self {
        Self { repo: Arc::new(repo) }
    }
}
