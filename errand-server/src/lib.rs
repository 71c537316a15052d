//! In-memory mock of the remote todo collection endpoint.
//!
//! Stands in for the public placeholder API during tests and local demos:
//! `GET /todos` honors the `_limit` query parameter, `POST /todos` assigns
//! the next integer identifier and echoes the stored record.

pub mod api;

use std::sync::atomic::AtomicI64;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use errand_core::Coordinate;
use serde::Serialize;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// One record held by the mock collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTodo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

pub struct AppState {
    pub todos: Mutex<Vec<StoredTodo>>,
    pub next_id: AtomicI64,
}

const SEED_TITLES: [&str; 10] = [
    "Pick up dry cleaning",
    "Buy groceries",
    "Renew passport",
    "Water the plants",
    "Return library books",
    "Book dentist appointment",
    "Fix bike tire",
    "Pay electricity bill",
    "Call the plumber",
    "Clean the garage",
];

impl AppState {
    /// Deterministic seed collection: ids 1..=10, every third record
    /// completed.
    pub fn seeded() -> Self {
        let todos = SEED_TITLES
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let id = i as i64 + 1;
                StoredTodo {
                    id,
                    title: (*title).to_string(),
                    completed: id % 3 == 0,
                    description: None,
                    location: None,
                    created_at: None,
                }
            })
            .collect();

        Self {
            todos: Mutex::new(todos),
            next_id: AtomicI64::new(SEED_TITLES.len() as i64 + 1),
        }
    }

    /// An empty collection; POST ids start at 1.
    pub fn empty() -> Self {
        Self {
            todos: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(api::list_todos).post(api::create_todo))
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the mock API on an already-bound listener. Used by the binary and
/// by in-process test fixtures.
pub async fn serve(listener: tokio::net::TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}
