use chrono::{SecondsFormat, Utc};
use errand_core::{CreateTaskRequest, CreateTaskResponse, Task, TaskDraft, TaskResult, TodoRecord};

/// Size of the batch pulled by the initial fetch.
const INITIAL_FETCH_LIMIT: usize = 5;

/// Remote sync gateway over the todo collection endpoint.
///
/// Failures are returned to the caller untouched; this layer never applies
/// partial state and never retries.
pub struct RemoteGateway {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Pull the initial batch from the remote collection and map each
    /// record to a task. Timestamps are stamped at import time; the remote
    /// shape carries no creation time of its own.
    pub async fn fetch_initial(&self) -> TaskResult<Vec<Task>> {
        let url = format!("{}/todos?_limit={}", self.base_url, INITIAL_FETCH_LIMIT);
        tracing::debug!(%url, "fetching initial tasks");

        let records: Vec<TodoRecord> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let imported_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let tasks: Vec<Task> = records
            .into_iter()
            .map(|record| Task {
                id: record.id.to_string(),
                title: record.title,
                description: String::new(),
                completed: record.completed,
                location: None,
                created_at: imported_at.clone(),
            })
            .collect();

        tracing::info!(count = tasks.len(), "fetched initial tasks");
        Ok(tasks)
    }

    /// Submit a draft to the collection endpoint and merge the echoed
    /// identifier with the client-supplied fields.
    pub async fn submit(&self, draft: &TaskDraft) -> TaskResult<Task> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let body = CreateTaskRequest {
            title: draft.title.clone(),
            completed: false,
            description: draft.description.clone(),
            location: draft.location,
            created_at: created_at.clone(),
        };

        let url = format!("{}/todos", self.base_url);
        tracing::debug!(%url, title = %draft.title, "submitting new task");

        let response: CreateTaskResponse = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::info!(id = response.id, "task accepted by remote");
        Ok(Task {
            id: response.id.to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            completed: false,
            location: draft.location,
            created_at,
        })
    }
}
