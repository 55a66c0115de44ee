//! Router integration tests against an in-memory history and an offline LLM.

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use shai_api::router;
use shai_api::scope::CLIENT_ID_HEADER;
use shai_core::Data;
use shai_history::storage::MemoryStore;
use shai_history::{HistoryStore, MAX_HISTORY_RECORDS, StorageService};
use shai_llm::{ClaudeClient, LlmService, Persona};
use tower::ServiceExt;

struct Harness {
    app: Router,
    storage: MemoryStore,
}

fn harness() -> Harness {
    harness_with_web_dir(None)
}

fn harness_with_web_dir(web_dir: Option<&std::path::Path>) -> Harness {
    let storage = MemoryStore::new();
    let history = HistoryStore::new(StorageService::from_memory(storage.clone(), "shai:test"));
    let claude = ClaudeClient::new(None, "test-model", Duration::from_secs(1))
        .expect("client")
        .with_endpoint("http://127.0.0.1:9/unreachable");
    let data = Data::new(history, LlmService::claude(claude));

    Harness {
        app: router(data, web_dir),
        storage,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(path: &str, body: &str, client: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(client) = client {
        builder = builder.header(CLIENT_ID_HEADER, client);
    }
    builder.body(Body::from(body.to_owned())).expect("request")
}

fn request(method: Method, path: &str, client: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(client) = client {
        builder = builder.header(CLIENT_ID_HEADER, client);
    }
    builder.body(Body::empty()).expect("request")
}

async fn generate(app: &Router, input: &str, client: Option<&str>) -> Value {
    let body = json!({ "input": input }).to_string();
    let (status, body) = send(app, post_json("/generate", &body, client)).await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn history(app: &Router, client: Option<&str>) -> Vec<Value> {
    let (status, body) = send(app, request(Method::GET, "/history", client)).await;
    assert_eq!(status, StatusCode::OK);
    body["history"].as_array().cloned().expect("history array")
}

#[tokio::test]
async fn generate_returns_lines_and_records_them() {
    let h = harness();

    let body = generate(&h.app, "  I am at a coffee shop ", None).await;
    let expected_lines = Persona::PickupLines.fallback_lines("I am at a coffee shop");

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["input"], json!("I am at a coffee shop"));
    assert_eq!(body["pickup_lines"], json!(expected_lines));
    assert_eq!(body["using_local"], json!(false));
    assert!(body["timestamp"].is_string());

    let records = history(&h.app, None).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], body["id"]);
    assert_eq!(records[0]["userInput"], json!("I am at a coffee shop"));
    assert_eq!(records[0]["pickupLines"], body["pickup_lines"]);
    assert_eq!(records[0]["timestamp"], body["timestamp"]);
    assert_eq!(records[0]["usingLocal"], json!(false));
}

#[tokio::test]
async fn generate_rejects_bad_bodies() {
    let h = harness();

    for body in [r#"{"input": ""}"#, r#"{"input": "   "}"#, "{}", "", "invalid json"] {
        let (status, response) = send(&h.app, post_json("/generate", body, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");
        assert_eq!(response["success"], json!(false));
        assert!(response["error"].is_string());
    }

    assert!(history(&h.app, None).await.is_empty());
}

#[tokio::test]
async fn history_is_newest_first_and_capped() {
    let h = harness();

    let mut ids = Vec::new();
    for n in 0..=MAX_HISTORY_RECORDS {
        let body = generate(&h.app, &format!("situation {n}"), None).await;
        ids.push(body["id"].clone());
    }

    let records = history(&h.app, None).await;
    assert_eq!(records.len(), MAX_HISTORY_RECORDS);
    assert_eq!(records[0]["id"], ids[MAX_HISTORY_RECORDS]);
    assert!(records.iter().all(|record| record["id"] != ids[0]));
}

#[tokio::test]
async fn remove_reports_whether_anything_was_deleted() {
    let h = harness();
    let first = generate(&h.app, "park", None).await;
    let second = generate(&h.app, "gym", None).await;
    generate(&h.app, "library", None).await;

    let (status, body) = send(&h.app, request(Method::DELETE, "/history/nonexistent-id", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "removed": false }));
    assert_eq!(history(&h.app, None).await.len(), 3);

    let path = format!("/history/{}", second["id"].as_str().expect("id"));
    let (_, body) = send(&h.app, request(Method::DELETE, &path, None)).await;
    assert_eq!(body["removed"], json!(true));

    let records = history(&h.app, None).await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["id"], first["id"]);
}

#[tokio::test]
async fn clear_empties_history() {
    let h = harness();
    generate(&h.app, "beach", None).await;

    let (status, body) = send(&h.app, request(Method::DELETE, "/history", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert!(history(&h.app, None).await.is_empty());
}

#[tokio::test]
async fn clear_surfaces_storage_failures() {
    let h = harness();
    h.storage.set_available(false);

    let (status, body) = send(&h.app, request(Method::DELETE, "/history", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert!(
        body["error"]
            .as_str()
            .expect("error")
            .starts_with("Failed to clear history")
    );

    assert!(history(&h.app, None).await.is_empty());
}

#[tokio::test]
async fn generate_still_answers_when_storage_is_down() {
    let h = harness();
    h.storage.set_available(false);

    let body = generate(&h.app, "concert", None).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["pickup_lines"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn clients_get_separate_histories() {
    let h = harness();
    generate(&h.app, "museum", Some("alice")).await;
    generate(&h.app, "bookstore", Some("bob")).await;
    generate(&h.app, "train", Some("bob")).await;

    assert_eq!(history(&h.app, Some("alice")).await.len(), 1);
    assert_eq!(history(&h.app, Some("bob")).await.len(), 2);
    assert!(history(&h.app, None).await.is_empty());

    send(&h.app, request(Method::DELETE, "/history", Some("bob"))).await;
    assert_eq!(history(&h.app, Some("alice")).await.len(), 1);
    assert!(history(&h.app, Some("bob")).await.is_empty());
}

#[tokio::test]
async fn agree_is_not_recorded() {
    let h = harness();

    let body = json!({ "input": "tabs beat spaces" }).to_string();
    let (status, response) = send(&h.app, post_json("/api/agree", &body, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], json!(true));
    assert_eq!(
        response["agreements"],
        json!(Persona::AgreeBot.fallback_lines("tabs beat spaces"))
    );
    assert!(history(&h.app, None).await.is_empty());

    let (status, _) = send(&h.app, post_json("/api/agree", "{}", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_and_tokens_report_state() {
    let h = harness();

    let (status, body) = send(&h.app, request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["using_local"], json!(false));
    assert_eq!(body["claude_configured"], json!(false));
    assert_eq!(body["total_tokens"], json!(0));
    assert_eq!(body["history_backend"], json!("memory"));

    let (status, body) = send(&h.app, request(Method::GET, "/api/tokens", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokens"], json!(0));
    assert_eq!(body["gallons"], json!(0.0));
    assert_eq!(body["conversion_rate"], json!(0.0002));
}

#[tokio::test]
async fn unknown_paths_are_json_404s() {
    let h = harness();

    let (status, body) = send(&h.app, request(Method::GET, "/nonexistent-page", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Not found" }));
}

#[tokio::test]
async fn missing_static_files_are_json_404s() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("index.html"), "<h1>ShAI</h1>").expect("write index");
    let h = harness_with_web_dir(Some(dir.path()));

    let response = h
        .app
        .clone()
        .oneshot(request(Method::GET, "/index.html", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = send(&h.app, request(Method::GET, "/missing.js", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Not found" }));

    let (status, _) = send(&h.app, request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
}
