use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use errand_core::protocol::CreateTaskRequest;

use crate::{AppState, StoredTodo};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(rename = "_limit")]
    pub limit: Option<usize>,
}

/// `GET /todos`: the collection, truncated to `_limit` when present.
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Json<Vec<StoredTodo>> {
    let todos = state.todos.lock().await;
    let limit = params.limit.unwrap_or(todos.len());
    let page: Vec<StoredTodo> = todos.iter().take(limit).cloned().collect();

    tracing::debug!(returned = page.len(), total = todos.len(), "listing todos");
    Json(page)
}

/// `POST /todos`: store the submitted record under the next integer id
/// and echo it back.
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> (StatusCode, Json<StoredTodo>) {
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let record = StoredTodo {
        id,
        title: req.title,
        completed: req.completed,
        description: Some(req.description),
        location: req.location,
        created_at: Some(req.created_at),
    };

    state.todos.lock().await.push(record.clone());
    tracing::info!(id, title = %record.title, "stored new todo");

    (StatusCode::CREATED, Json(record))
}
