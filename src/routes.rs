use axum::Json;
use axum::extract::{Path, Query};
use axum::http::{HeaderValue, Method, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(state)
        .layer(cors())
}

/// Origins the browser frontend is served from, overridable via
/// `FRONTEND_ORIGINS` (comma-separated).
fn cors() -> CorsLayer {
    let origins = std::env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string());
    let origins: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

#[derive(Serialize)]
struct HelloResponse {
    message: String,
}

async fn root() -> &'static str {
    "Circle API is running!"
}

async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from the Circle API!".to_string(),
    })
}

/// Plain array by default; an explicit `page`/`limit` query opts into the
/// paginated envelope.
async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<PaginationQuery>,
) -> Result<Response, AppError> {
    let todos = state.repo.list().await;
    if params.is_empty() {
        return Ok(Json(todos).into_response());
    }

    let (page, limit) = params.validate()?;
    let (window, total) = paginate(&todos, page, limit);
    let body = PaginatedResponse::new(window.to_vec(), Pagination { page, limit, total });
    Ok(Json(body).into_response())
}

async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    req.validate()?;
    let todo = state.repo.insert(req.title).await;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Todo>, AppError> {
    let todo = state.repo.get(id).await.ok_or(AppError::NotFound(id))?;
    Ok(Json(todo))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, AppError> {
    req.validate()?;
    let todo = state
        .repo
        .update(id, &req)
        .await
        .ok_or(AppError::NotFound(id))?;
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, AppError> {
    if state.repo.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(id))
    }
}
