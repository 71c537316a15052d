//! Pure derivation of the displayed task list from the store's state.
//!
//! Nothing here mutates its input; every call returns a fresh sequence.
//! The functions are consumed by the presentation layer only and their
//! results are never persisted.

use crate::models::{Filter, SortKey, Task};

/// Keep the tasks matching the active completion filter.
pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| match filter {
            Filter::All => true,
            Filter::Completed => t.completed,
            Filter::Incomplete => !t.completed,
        })
        .cloned()
        .collect()
}

/// Order tasks by the active sort key: most recent first for `Date`
/// (unreadable timestamps sink to the epoch), case-insensitive ascending
/// for `Title` with the raw title breaking ties.
pub fn sort_tasks(tasks: &[Task], sort_by: SortKey) -> Vec<Task> {
    let mut view = tasks.to_vec();
    match sort_by {
        SortKey::Date => {
            view.sort_by_key(|t| std::cmp::Reverse(t.created_at_utc()));
        }
        SortKey::Title => {
            view.sort_by_cached_key(|t| (t.title.to_lowercase(), t.title.clone()));
        }
    }
    view
}

/// The full derived view: filter, then sort.
pub fn derive_view(tasks: &[Task], filter: Filter, sort_by: SortKey) -> Vec<Task> {
    sort_tasks(&filter_tasks(tasks, filter), sort_by)
}
