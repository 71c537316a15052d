pub mod client;
pub mod composer;
pub mod events;
pub mod queries;
pub mod remote;
pub mod routing;
pub mod storage;

pub use client::TaskClient;
pub use composer::{CreationFlow, CreationState};
pub use events::{EventDispatcher, TaskEvent};
pub use remote::RemoteGateway;
pub use routing::RoutePlanner;
pub use storage::{LocalStore, TASKS_SLOT};

#[cfg(test)]
mod tests {
    use super::*;
    use errand_core::{Coordinate, Task};

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task {
                id: "1722600000000".to_string(),
                title: "Buy milk".to_string(),
                description: "2 liters".to_string(),
                completed: false,
                location: Some(Coordinate {
                    latitude: 41.0082,
                    longitude: 28.9784,
                }),
                created_at: "2026-08-05T10:00:00.000Z".to_string(),
            },
            Task {
                id: "7".to_string(),
                title: "Call mom".to_string(),
                description: String::new(),
                completed: true,
                location: None,
                created_at: "2026-08-04T18:00:00.000Z".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let store = LocalStore::new(":memory:").await.unwrap();
        store.ensure_schema().await.unwrap();

        let tasks = sample_tasks();
        store.save_tasks(&tasks).await.unwrap();

        let loaded = store.load_tasks().await.unwrap();
        assert_eq!(loaded, tasks);
    }

    #[tokio::test]
    async fn test_load_without_stored_data_is_empty() {
        let store = LocalStore::new(":memory:").await.unwrap();
        store.ensure_schema().await.unwrap();

        assert!(store.load_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_slot_recovers_as_empty() {
        let store = LocalStore::new(":memory:").await.unwrap();
        store.ensure_schema().await.unwrap();

        sqlx::query("INSERT INTO slots (key, value) VALUES (?1, ?2)")
            .bind(TASKS_SLOT)
            .bind("{not json at all")
            .execute(&store.pool)
            .await
            .unwrap();

        assert!(store.load_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_the_previous_snapshot() {
        let store = LocalStore::new(":memory:").await.unwrap();
        store.ensure_schema().await.unwrap();

        store.save_tasks(&sample_tasks()).await.unwrap();
        store.save_tasks(&[]).await.unwrap();

        assert!(store.load_tasks().await.unwrap().is_empty());
    }
}
