use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;
use tracing::error;

use crate::models::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{field} {message}")]
    Validation { field: &'static str, message: String },

    #[error("Todo with id {0} not found")]
    NotFound(u32),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Transport(_) | AppError::UnexpectedStatus { .. } | AppError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Config(_) => {
                error!("configuration error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ApiResponse::<()>::failure(self.to_string()));
        (status, body).into_response()
    }
}
