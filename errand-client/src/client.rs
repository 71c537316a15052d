use std::sync::Arc;

use errand_core::{derive_view, Coordinate, Filter, SortKey, Task, TaskResult, TaskStore};
use tokio_util::sync::CancellationToken;

use crate::composer::{CreationFlow, CreationState};
use crate::events::{EventDispatcher, TaskEvent};
use crate::remote::RemoteGateway;
use crate::storage::LocalStore;

/// Application root for the task list: owns the store and drives the
/// persistence and remote gateways around its transitions.
///
/// Every mutation of the task collection is followed by a full-collection
/// write to local storage, and every observable change is announced on the
/// event dispatcher. The store itself stays free of side effects.
pub struct TaskClient {
    store: TaskStore,
    local: LocalStore,
    remote: RemoteGateway,
    events: Arc<EventDispatcher>,
}

impl TaskClient {
    pub async fn new(database_url: &str, api_base_url: &str) -> TaskResult<Self> {
        let local = LocalStore::new(database_url).await?;
        local.ensure_schema().await?;

        Ok(Self {
            store: TaskStore::new(),
            local,
            remote: RemoteGateway::new(api_base_url),
            events: Arc::new(EventDispatcher::new()),
        })
    }

    pub fn events(&self) -> Arc<EventDispatcher> {
        self.events.clone()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The filtered and sorted sequence the presentation layer displays.
    pub fn visible_tasks(&self) -> Vec<Task> {
        derive_view(
            self.store.tasks(),
            self.store.filter(),
            self.store.sort_by(),
        )
    }

    /// Bring the store up at application start: install the stored
    /// snapshot first, then let a successful remote fetch replace it
    /// wholesale. A failed fetch leaves the snapshot in place and is
    /// surfaced as an event, never as an error.
    pub async fn startup(&mut self) -> TaskResult<()> {
        let snapshot = self.local.load_tasks().await?;
        tracing::info!(count = snapshot.len(), "installed stored snapshot");
        self.store.replace_all(snapshot);
        self.events.emit(TaskEvent::TasksReplaced {
            count: self.store.tasks().len(),
        });

        self.events.emit(TaskEvent::SyncStarted);
        match self.remote.fetch_initial().await {
            Ok(tasks) => {
                let count = tasks.len();
                self.store.replace_all(tasks);
                self.local.save_tasks(self.store.tasks()).await?;
                self.events.emit(TaskEvent::TasksReplaced { count });
                self.events.emit(TaskEvent::SyncCompleted { count });
            }
            Err(e) => {
                tracing::warn!(error = %e, "initial fetch failed, keeping stored snapshot");
                self.events.emit(TaskEvent::SyncFailed {
                    message: e.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Create a task locally. Blank titles are a silent no-op; `None` is
    /// returned and nothing is stored.
    pub async fn add_task(
        &mut self,
        title: &str,
        description: &str,
        location: Option<Coordinate>,
    ) -> TaskResult<Option<Task>> {
        let Some(task) = self.store.add(title, description, location).cloned() else {
            return Ok(None);
        };

        self.local.save_tasks(self.store.tasks()).await?;
        self.events.emit(TaskEvent::TaskAdded {
            id: task.id.clone(),
            title: task.title.clone(),
        });
        Ok(Some(task))
    }

    /// Flip a task's completion state. Unknown ids are a no-op.
    pub async fn toggle_task(&mut self, id: &str) -> TaskResult<Option<bool>> {
        let Some(completed) = self.store.toggle_completed(id) else {
            return Ok(None);
        };

        self.local.save_tasks(self.store.tasks()).await?;
        self.events.emit(TaskEvent::TaskToggled {
            id: id.to_string(),
            completed,
        });
        Ok(Some(completed))
    }

    /// Remove a task. Unknown ids are a no-op.
    pub async fn remove_task(&mut self, id: &str) -> TaskResult<bool> {
        if !self.store.remove(id) {
            return Ok(false);
        }

        self.local.save_tasks(self.store.tasks()).await?;
        self.events.emit(TaskEvent::TaskRemoved { id: id.to_string() });
        Ok(true)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.store.set_filter(filter);
    }

    pub fn set_sort_by(&mut self, sort_by: SortKey) {
        self.store.set_sort_by(sort_by);
    }

    /// Hand a picked location to (or withdraw it from) the creation flow.
    pub fn select_location(&mut self, location: Option<Coordinate>) {
        self.store.set_selected_location(location);
        match location {
            Some(coordinate) => self.events.emit(TaskEvent::LocationSelected { coordinate }),
            None => self.events.emit(TaskEvent::LocationCleared),
        }
    }

    /// Drive one submission of the creation flow.
    ///
    /// On success the merged record is appended, the collection persisted
    /// and the picked location cleared. On failure the flow keeps its
    /// draft for retry and nothing is touched. A submission whose
    /// initiating view was cancelled discards the outcome instead of
    /// mutating the store.
    pub async fn submit_creation(
        &mut self,
        flow: &mut CreationFlow,
        cancel: &CancellationToken,
    ) -> TaskResult<CreationState> {
        let Some(draft) = flow.begin_submit() else {
            return Ok(flow.state());
        };

        let submitted = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("creation flow cancelled while submitting");
                flow.abandoned();
                return Ok(flow.state());
            }
            result = self.remote.submit(&draft) => result,
        };

        match submitted {
            Ok(task) => {
                if cancel.is_cancelled() {
                    tracing::warn!(id = %task.id, "submission resolved after cancellation, discarding");
                    flow.abandoned();
                    return Ok(flow.state());
                }

                let id = task.id.clone();
                let title = task.title.clone();
                self.store.append(task);
                self.local.save_tasks(self.store.tasks()).await?;
                self.store.set_selected_location(None);

                flow.committed(id.clone());
                self.events.emit(TaskEvent::TaskAdded { id, title });
                self.events.emit(TaskEvent::LocationCleared);
            }
            Err(e) => {
                tracing::warn!(error = %e, "submission failed, keeping draft for retry");
                flow.failed(e.to_string());
                self.events.emit(TaskEvent::SyncFailed {
                    message: e.to_string(),
                });
            }
        }

        Ok(flow.state())
    }
}
