use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio::time::timeout;

use rust_web_chat::common::{ApiCommand, ApiEvent};
use rust_web_chat::network::{ApiClient, ChatApi};

/// Per-endpoint call counters shared with the test server.
#[derive(Clone, Default)]
struct Hits {
    send: Arc<AtomicUsize>,
    mark_read: Arc<AtomicUsize>,
    refresh: Arc<AtomicUsize>,
    search: Arc<AtomicUsize>,
    last_sent_content: Arc<Mutex<Option<String>>>,
    last_search_query: Arc<Mutex<Option<String>>>,
}

#[derive(Deserialize)]
struct SendForm {
    content: String,
}

async fn send_ok(State(hits): State<Hits>, Form(form): Form<SendForm>) -> Json<Value> {
    hits.send.fetch_add(1, Ordering::SeqCst);
    *hits.last_sent_content.lock().unwrap() = Some(form.content.clone());
    Json(json!({
        "success": true,
        "message": {
            "id": 1,
            "content": form.content,
            "created_at": "10:00",
            "is_delivered": false
        }
    }))
}

async fn list_messages(State(hits): State<Hits>, Path(_id): Path<String>) -> Json<Value> {
    hits.refresh.fetch_add(1, Ordering::SeqCst);
    Json(json!([]))
}

async fn mark_read(State(hits): State<Hits>, Path(_id): Path<String>) {
    hits.mark_read.fetch_add(1, Ordering::SeqCst);
}

async fn search(
    State(hits): State<Hits>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    hits.search.fetch_add(1, Ordering::SeqCst);
    *hits.last_search_query.lock().unwrap() = params.get("q").cloned();
    Json(json!({"users": [], "messages": []}))
}

fn success_router(hits: Hits) -> Router {
    Router::new()
        .route("/send_message", post(send_ok))
        .route("/chat/{id}/messages", get(list_messages))
        .route("/chat/{id}/mark_read", post(mark_read))
        .route("/search", get(search))
        .with_state(hits)
}

fn rejection_router() -> Router {
    Router::new().route(
        "/send_message",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "You are not a member of this chat"})),
            )
        }),
    )
}

fn malformed_router() -> Router {
    Router::new().route("/send_message", post(|| async { Json(json!({"success": true})) }))
}

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// An address nothing listens on.
async fn refused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn spawn_client(
    base_url: &str,
    chat_id: Option<&str>,
) -> (mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(16);
    let client = ApiClient::new(
        ChatApi::new(base_url),
        chat_id.map(str::to_string),
        event_tx,
        cmd_rx,
    );
    tokio::spawn(async move {
        let _ = client.run().await;
    });
    (cmd_tx, event_rx)
}

async fn next_event(event_rx: &mut mpsc::Receiver<ApiEvent>) -> ApiEvent {
    timeout(Duration::from_secs(5), event_rx.recv())
        .await
        .expect("timed out waiting for an event")
        .expect("event channel closed")
}

#[tokio::test]
async fn successful_send_reports_the_echoed_message() {
    let hits = Hits::default();
    let base = spawn_server(success_router(hits.clone())).await;
    let (cmd_tx, mut event_rx) = spawn_client(&base, Some("7")).await;

    cmd_tx
        .send(ApiCommand::SendMessage("hello".to_string()))
        .await
        .unwrap();

    match next_event(&mut event_rx).await {
        ApiEvent::MessageSent(message) => {
            assert_eq!(message.content, "hello");
            assert_eq!(message.created_at, "10:00");
            assert!(!message.is_delivered);
        }
        other => panic!("expected MessageSent, got {other:?}"),
    }
    assert_eq!(hits.send.load(Ordering::SeqCst), 1);
    assert_eq!(
        hits.last_sent_content.lock().unwrap().as_deref(),
        Some("hello")
    );
}

#[tokio::test]
async fn rejected_send_surfaces_the_server_reason() {
    let base = spawn_server(rejection_router()).await;
    let (cmd_tx, mut event_rx) = spawn_client(&base, Some("7")).await;

    cmd_tx
        .send(ApiCommand::SendMessage("hello".to_string()))
        .await
        .unwrap();

    match next_event(&mut event_rx).await {
        ApiEvent::SendFailed(reason) => {
            assert_eq!(reason, "You are not a member of this chat");
        }
        other => panic!("expected SendFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_uses_the_generic_error_text() {
    let base = refused_base_url().await;
    let (cmd_tx, mut event_rx) = spawn_client(&base, Some("7")).await;

    cmd_tx
        .send(ApiCommand::SendMessage("hello".to_string()))
        .await
        .unwrap();

    match next_event(&mut event_rx).await {
        ApiEvent::SendFailed(reason) => {
            assert_eq!(reason, "Network error. Please try again.");
        }
        other => panic!("expected SendFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_envelope_fails_the_send() {
    let base = spawn_server(malformed_router()).await;
    let (cmd_tx, mut event_rx) = spawn_client(&base, Some("7")).await;

    cmd_tx
        .send(ApiCommand::SendMessage("hello".to_string()))
        .await
        .unwrap();

    match next_event(&mut event_rx).await {
        ApiEvent::SendFailed(reason) => {
            assert_eq!(reason, "Network error. Please try again.");
        }
        other => panic!("expected SendFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn send_without_an_open_conversation_fails_locally() {
    let hits = Hits::default();
    let base = spawn_server(success_router(hits.clone())).await;
    let (cmd_tx, mut event_rx) = spawn_client(&base, None).await;

    cmd_tx
        .send(ApiCommand::SendMessage("hello".to_string()))
        .await
        .unwrap();

    match next_event(&mut event_rx).await {
        ApiEvent::SendFailed(reason) => assert_eq!(reason, "No conversation is open."),
        other => panic!("expected SendFailed, got {other:?}"),
    }
    assert_eq!(hits.send.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn mark_read_fires_exactly_once_per_start() {
    let hits = Hits::default();
    let base = spawn_server(success_router(hits.clone())).await;
    let (_cmd_tx, _event_rx) = spawn_client(&base, Some("5")).await;

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(hits.mark_read.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn refresh_skips_ticks_without_a_conversation() {
    let hits = Hits::default();
    let base = spawn_server(success_router(hits.clone())).await;
    let (_cmd_tx, _event_rx) = spawn_client(&base, None).await;
    tokio::task::yield_now().await;

    // Two full refresh periods pass without a conversation id.
    tokio::time::advance(Duration::from_secs(11)).await;
    tokio::task::yield_now().await;

    assert_eq!(hits.refresh.load(Ordering::SeqCst), 0);
    assert_eq!(hits.mark_read.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn refresh_polls_the_message_list() {
    let hits = Hits::default();
    let base = spawn_server(success_router(hits.clone())).await;
    let (_cmd_tx, _event_rx) = spawn_client(&base, Some("7")).await;
    tokio::task::yield_now().await;

    tokio::time::advance(Duration::from_secs(6)).await;
    tokio::time::resume();
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(hits.refresh.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn rapid_search_input_collapses_to_one_request() {
    let hits = Hits::default();
    let base = spawn_server(success_router(hits.clone())).await;
    let (cmd_tx, mut event_rx) = spawn_client(&base, Some("7")).await;

    for query in ["ru", "rus", "rust"] {
        cmd_tx
            .send(ApiCommand::Search(query.to_string()))
            .await
            .unwrap();
    }

    match next_event(&mut event_rx).await {
        ApiEvent::SearchCompleted(results) => assert!(results.is_empty()),
        other => panic!("expected SearchCompleted, got {other:?}"),
    }
    assert_eq!(hits.search.load(Ordering::SeqCst), 1);
    assert_eq!(
        hits.last_search_query.lock().unwrap().as_deref(),
        Some("rust")
    );
}

#[tokio::test]
async fn short_search_query_clears_without_a_request() {
    let hits = Hits::default();
    let base = spawn_server(success_router(hits.clone())).await;
    let (cmd_tx, mut event_rx) = spawn_client(&base, Some("7")).await;

    cmd_tx
        .send(ApiCommand::Search("r".to_string()))
        .await
        .unwrap();

    match next_event(&mut event_rx).await {
        ApiEvent::SearchCleared => {}
        other => panic!("expected SearchCleared, got {other:?}"),
    }
    assert_eq!(hits.search.load(Ordering::SeqCst), 0);
}
