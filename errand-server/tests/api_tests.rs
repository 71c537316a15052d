use std::sync::Arc;

use errand_server::AppState;
use serde_json::{json, Value};

async fn spawn_server(state: AppState) -> String {
    let port = portpicker::pick_unused_port().expect("no free port");
    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind test listener");

    tokio::spawn(errand_server::serve(listener, Arc::new(state)));
    format!("http://{addr}")
}

#[tokio::test]
async fn test_list_honors_limit() {
    let base = spawn_server(AppState::seeded()).await;

    let todos: Vec<Value> = reqwest::get(format!("{base}/todos?_limit=5"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(todos.len(), 5);
    assert_eq!(todos[0]["id"], 1);
    assert_eq!(todos[2]["id"], 3);
    // Every third seed record is completed.
    assert_eq!(todos[2]["completed"], true);
    assert_eq!(todos[0]["completed"], false);
}

#[tokio::test]
async fn test_list_without_limit_returns_everything() {
    let base = spawn_server(AppState::seeded()).await;

    let todos: Vec<Value> = reqwest::get(format!("{base}/todos"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(todos.len(), 10);
}

#[tokio::test]
async fn test_create_assigns_the_next_id_and_echoes() {
    let base = spawn_server(AppState::seeded()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/todos"))
        .json(&json!({
            "title": "Buy milk",
            "completed": false,
            "description": "2 liters",
            "location": { "latitude": 41.0082, "longitude": 28.9784 },
            "createdAt": "2026-08-05T10:00:00.000Z"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["id"], 11);
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["location"]["latitude"], 41.0082);
    assert_eq!(created["createdAt"], "2026-08-05T10:00:00.000Z");

    // The stored record shows up in subsequent listings.
    let todos: Vec<Value> = reqwest::get(format!("{base}/todos"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(todos.len(), 11);
    assert_eq!(todos[10]["id"], 11);
}

#[tokio::test]
async fn test_ids_keep_increasing_across_creates() {
    let base = spawn_server(AppState::empty()).await;
    let client = reqwest::Client::new();

    for expected in 1..=3 {
        let created: Value = client
            .post(format!("{base}/todos"))
            .json(&json!({
                "title": format!("task {expected}"),
                "completed": false,
                "description": "",
                "location": null,
                "createdAt": "2026-08-05T10:00:00.000Z"
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(created["id"], expected);
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let base = spawn_server(AppState::seeded()).await;

    let body = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "OK");
}
