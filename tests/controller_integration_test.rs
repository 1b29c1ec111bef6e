//! End-to-end coverage: the controllers and the HTTP store running against a
//! real server bound on a local port, so the full request path (serialization,
//! status mapping, envelope parsing) is exercised.

use std::sync::Arc;

use circle::controllers::{DetailController, ListController};
use circle::error::AppError;
use circle::models::{CreateTodoRequest, UpdateTodoRequest};
use circle::remote::{HttpTodoStore, StoreConfig, TodoStore};
use circle::repository::TodoRepository;
use circle::routes::router;
use circle::state::AppState;

async fn spawn_server() -> String {
    let app = router(AppState::new(TodoRepository::new()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn store(base_url: &str) -> Arc<HttpTodoStore> {
    Arc::new(HttpTodoStore::new(StoreConfig::new(base_url)).expect("build store"))
}

#[tokio::test]
async fn http_store_crud_roundtrip() {
    let base_url = spawn_server().await;
    let store = store(&base_url);

    assert!(store.list().await.expect("list").is_empty());

    let created = store
        .create(&CreateTodoRequest {
            title: "Buy milk".to_string(),
        })
        .await
        .expect("create");
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Buy milk");
    assert!(created.created_at.is_some());

    store
        .update(
            created.id,
            &UpdateTodoRequest {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    let todos = store.list().await.expect("list");
    assert_eq!(todos.len(), 1);
    assert!(todos[0].completed);

    store.delete(created.id).await.expect("delete");
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn http_store_surfaces_envelope_message_on_404() {
    let base_url = spawn_server().await;
    let store = store(&base_url);

    let err = store.delete(42).await.expect_err("should be missing");
    match err {
        AppError::UnexpectedStatus { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Todo with id 42 not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn http_store_rejects_invalid_title_server_side() {
    let base_url = spawn_server().await;
    let store = store(&base_url);

    // Client pre-validation is not sufficient by contract; the server must
    // reject too, and the client must handle that rejection.
    let err = store
        .create(&CreateTodoRequest { title: String::new() })
        .await
        .expect_err("server rejects empty title");
    match err {
        AppError::UnexpectedStatus { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "title must not be empty");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Nothing listens on this port.
    let store = store("http://127.0.0.1:9");
    let err = store.list().await.expect_err("no server");
    assert!(matches!(err, AppError::Transport(_)));
}

#[tokio::test]
async fn list_controller_full_cycle_over_http() {
    let base_url = spawn_server().await;
    let mut list = ListController::new(store(&base_url));

    list.load().await;
    assert!(list.items().is_empty());
    assert!(!list.loading());

    list.set_new_title("Buy milk");
    list.create().await;
    assert_eq!(list.items().len(), 1);
    assert_eq!(list.new_title(), "");
    let id = list.items()[0].id;

    list.toggle_completed(id).await;
    assert!(list.items()[0].completed);
    assert!(list.error().is_none());

    list.start_editing(id);
    list.rename(id, "Buy oat milk").await;
    assert_eq!(list.items()[0].title, "Buy oat milk");

    // A second load must agree with the optimistic state.
    let optimistic = list.items().to_vec();
    list.load().await;
    assert_eq!(list.items(), optimistic);

    list.delete(id).await;
    assert!(list.items().is_empty());
    list.load().await;
    assert!(list.items().is_empty());
}

#[tokio::test]
async fn detail_controller_full_cycle_over_http() {
    let base_url = spawn_server().await;
    let store = store(&base_url);

    let created = store
        .create(&CreateTodoRequest {
            title: "Write report".to_string(),
        })
        .await
        .expect("create");

    let mut detail = DetailController::new(store.clone(), created.id);
    detail.load().await;
    assert_eq!(detail.todo().unwrap().title, "Write report");

    detail.toggle_completed().await;
    assert!(detail.todo().unwrap().completed);

    detail.enter_edit_mode();
    detail.set_edit_title("Write the report");
    detail.rename().await;
    assert!(!detail.edit_mode());

    let on_server = store.list().await.expect("list");
    assert_eq!(on_server[0].title, "Write the report");
    assert!(on_server[0].completed);

    detail.delete().await;
    assert!(detail.deleted());
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn detail_controller_missing_id_is_blocking() {
    let base_url = spawn_server().await;
    let mut detail = DetailController::new(store(&base_url), 123);

    detail.load().await;

    assert!(detail.todo().is_none());
    assert_eq!(detail.error().unwrap(), "Todo with id 123 not found");
}
