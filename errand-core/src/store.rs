use chrono::{SecondsFormat, Utc};

use crate::models::{Coordinate, Filter, SortKey, Task, TaskDraft};

/// Single source of truth for task data and view preferences.
///
/// Every transition is a synchronous in-memory state change; persistence and
/// remote calls are driven by the collaborator that owns the store, never
/// from here. The store is a plain value owned by the application root and
/// is not safe to share across threads without external synchronization.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: Filter,
    sort_by: SortKey,
    selected_location: Option<Coordinate>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    pub fn selected_location(&self) -> Option<Coordinate> {
        self.selected_location
    }

    /// Replace the whole collection verbatim. Used by both the stored-
    /// snapshot load and a successful remote fetch; last writer wins, no
    /// merging.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Append a freshly created task. Titles that are empty after trimming
    /// are ignored and `None` is returned; the caller surfaces nothing.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        location: Option<Coordinate>,
    ) -> Option<&Task> {
        let title = title.trim();
        if title.is_empty() {
            tracing::debug!("ignoring task creation with a blank title");
            return None;
        }

        let now = Utc::now();
        let task = Task {
            id: next_free_id(&self.tasks, now.timestamp_millis()),
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
            location,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.tasks.push(task);
        self.tasks.last()
    }

    /// Append a pre-built task, typically the merged record returned by a
    /// successful remote submission.
    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Flip the completion state of the matching task. Returns the new
    /// state, or `None` when no task carries the id.
    pub fn toggle_completed(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Drop the matching task. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_sort_by(&mut self, sort_by: SortKey) {
        self.sort_by = sort_by;
    }

    pub fn set_selected_location(&mut self, location: Option<Coordinate>) {
        self.selected_location = location;
    }

    /// Snapshot the creation-relevant fields, picking up the currently
    /// selected location when the draft carries none of its own.
    pub fn draft_with_selection(&self, title: &str, description: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: description.to_string(),
            location: self.selected_location,
        }
    }
}

/// Client-created identifiers are epoch-millisecond strings. Bump the
/// candidate until it is unused so rapid creation within one millisecond
/// cannot hand out the same id twice.
fn next_free_id(tasks: &[Task], stamp_millis: i64) -> String {
    let mut candidate = stamp_millis;
    loop {
        let id = candidate.to_string();
        if !tasks.iter().any(|t| t.id == id) {
            return id;
        }
        candidate += 1;
    }
}
