//! Wire shapes exchanged with the remote todo collection endpoint.

use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// One record of the `GET /todos` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Body submitted to `POST /todos` when a task is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub completed: bool,
    pub description: String,
    pub location: Option<Coordinate>,
    pub created_at: String,
}

/// Echo returned by `POST /todos`: the submitted fields plus the
/// server-assigned identifier. Only `id` is load-bearing for the caller,
/// which merges it back onto the client-supplied fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskResponse {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<Coordinate>,
    #[serde(default)]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_uses_camel_case() {
        let req = CreateTaskRequest {
            title: "Buy milk".to_string(),
            completed: false,
            description: String::new(),
            location: None,
            created_at: "2026-08-05T10:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["location"], serde_json::Value::Null);
    }

    #[test]
    fn test_response_tolerates_sparse_echo() {
        // A minimal placeholder-style echo carries little more than the id.
        let resp: CreateTaskResponse = serde_json::from_str(r#"{"id":201}"#).unwrap();
        assert_eq!(resp.id, 201);
        assert_eq!(resp.title, "");
    }

    #[test]
    fn test_todo_record_defaults_completed() {
        let record: TodoRecord = serde_json::from_str(r#"{"id":3,"title":"delectus"}"#).unwrap();
        assert!(!record.completed);
    }
}
