//! Errand - location-aware task list with local persistence and remote sync
//!
//! This crate provides a unified API for the Errand task system.
//!
//! # Example
//!
//! ```ignore
//! use errand::TaskClient;
//!
//! let mut client = TaskClient::new("sqlite:tasks.db?mode=rwc", "http://localhost:8080").await?;
//! client.startup().await?;
//! client.add_task("Buy milk", "", None).await?;
//! ```

// Re-export client types
pub use errand_client::{CreationFlow, CreationState, RoutePlanner, TaskClient, TaskEvent};

// Re-export server types
pub use errand_server::AppState as MockApi;

// Re-export core types that external applications may need
pub use errand_core::errors::ErrandError;
pub use errand_core::models::{Coordinate, Filter, SortKey, Task, TaskDraft};
pub use errand_core::store::TaskStore;
pub use errand_core::view::derive_view;
pub use errand_core::TaskResult;
