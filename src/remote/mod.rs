use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::AppError;
use crate::models::{ApiResponse, CreateTodoRequest, Todo, UpdateTodoRequest};

/// Where the remote todo collection lives. Injected into the client at
/// construction so tests can point it at a locally bound server.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub base_url: String,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("TODO_API_URL")
            .map_err(|_| AppError::Config("TODO_API_URL is not set".to_string()))?;
        Ok(Self::new(base_url))
    }
}

/// The remote todo collection as seen by the view controllers.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, AppError>;
    async fn create(&self, req: &CreateTodoRequest) -> Result<Todo, AppError>;
    /// The success body, when there is one, is not read.
    async fn update(&self, id: u32, req: &UpdateTodoRequest) -> Result<(), AppError>;
    async fn delete(&self, id: u32) -> Result<(), AppError>;
}

pub struct HttpTodoStore {
    client: Client,
    config: StoreConfig,
}

impl HttpTodoStore {
    pub fn new(config: StoreConfig) -> Result<Self, AppError> {
        // A hung request must surface as a transport error instead of
        // leaving a controller's loading state pending forever.
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Maps non-2xx responses to `UnexpectedStatus`, pulling the message out
    /// of the failure envelope when the body carries one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| match envelope {
                ApiResponse::Failure { message } => Some(message),
                ApiResponse::Success { .. } => None,
            })
            .unwrap_or(body);
        Err(AppError::UnexpectedStatus { status, message })
    }
}

#[async_trait]
impl TodoStore for HttpTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, AppError> {
        let response = self
            .client
            .get(self.url("/api/todos"))
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        let response = Self::check(response).await?;
        response
            .json::<Vec<Todo>>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    async fn create(&self, req: &CreateTodoRequest) -> Result<Todo, AppError> {
        let response = self
            .client
            .post(self.url("/api/todos"))
            .json(req)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        let response = Self::check(response).await?;
        response
            .json::<Todo>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    async fn update(&self, id: u32, req: &UpdateTodoRequest) -> Result<(), AppError> {
        let response = self
            .client
            .put(self.url(&format!("/api/todos/{id}")))
            .json(req)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, id: u32) -> Result<(), AppError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/todos/{id}")))
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_strips_trailing_slash() {
        let config = StoreConfig::new("http://localhost:3001/");
        assert_eq!(config.base_url, "http://localhost:3001");
    }

    #[test]
    fn config_keeps_clean_url() {
        let config = StoreConfig::new("http://localhost:3001");
        assert_eq!(config.base_url, "http://localhost:3001");
    }
}
