//! Queued event notifications for consumers of the task client.
//!
//! Events may be emitted from any context; callbacks only run when
//! `process_events` is called on the thread that registered them, so
//! consumer code needs no synchronization of its own.

use std::sync::{mpsc, Mutex};
use std::thread::{self, ThreadId};

use errand_core::{Coordinate, ErrandError, TaskResult};

/// Notifications emitted as the task client's state changes.
#[derive(Debug, Clone)]
pub enum TaskEvent {
    TaskAdded { id: String, title: String },
    TaskToggled { id: String, completed: bool },
    TaskRemoved { id: String },
    TasksReplaced { count: usize },
    SyncStarted,
    SyncCompleted { count: usize },
    SyncFailed { message: String },
    LocationSelected { coordinate: Coordinate },
    LocationCleared,
}

struct CallbackEntry {
    callback: Box<dyn Fn(TaskEvent) + Send>,
}

pub struct EventDispatcher {
    callbacks: Mutex<Vec<CallbackEntry>>,
    event_queue: Mutex<mpsc::Receiver<TaskEvent>>,
    event_sender: mpsc::Sender<TaskEvent>,
    callback_thread_id: Mutex<Option<ThreadId>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            callbacks: Mutex::new(Vec::new()),
            event_queue: Mutex::new(receiver),
            event_sender: sender,
            callback_thread_id: Mutex::new(None),
        }
    }

    /// Register a callback. The first registration pins the processing
    /// thread.
    pub fn register_callback<F>(&self, callback: F) -> TaskResult<()>
    where
        F: Fn(TaskEvent) + Send + 'static,
    {
        {
            let mut thread_id = self
                .callback_thread_id
                .lock()
                .map_err(|_| ErrandError::Lock("thread id".into()))?;
            if thread_id.is_none() {
                *thread_id = Some(thread::current().id());
            }
        }

        let mut callbacks = self
            .callbacks
            .lock()
            .map_err(|_| ErrandError::Lock("callbacks".into()))?;
        callbacks.push(CallbackEntry {
            callback: Box::new(callback),
        });

        Ok(())
    }

    /// Queue an event for the next `process_events` pass.
    pub fn emit(&self, event: TaskEvent) {
        if self.event_sender.send(event).is_err() {
            tracing::error!("failed to queue event, receiver dropped");
        }
    }

    /// Deliver all queued events. Must run on the thread that registered
    /// the callbacks; returns how many events were delivered.
    pub fn process_events(&self) -> TaskResult<usize> {
        {
            let thread_id = self
                .callback_thread_id
                .lock()
                .map_err(|_| ErrandError::Lock("thread id".into()))?;
            match *thread_id {
                Some(expected) if thread::current().id() != expected => {
                    return Err(ErrandError::ThreadAffinity);
                }
                Some(_) => {}
                None => return Err(ErrandError::NoCallbacksRegistered),
            }
        }

        let callbacks = self
            .callbacks
            .lock()
            .map_err(|_| ErrandError::Lock("callbacks".into()))?;
        let receiver = self
            .event_queue
            .lock()
            .map_err(|_| ErrandError::Lock("event queue".into()))?;

        let mut processed = 0;
        while let Ok(event) = receiver.try_recv() {
            for entry in callbacks.iter() {
                (entry.callback)(event.clone());
            }
            processed += 1;
        }

        Ok(processed)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_processing_without_callbacks_is_an_error() {
        let dispatcher = EventDispatcher::new();
        assert!(dispatcher.process_events().is_err());
    }

    #[test]
    fn test_events_are_queued_until_processed() {
        let dispatcher = EventDispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        dispatcher
            .register_callback(move |event| {
                if let TaskEvent::TaskAdded { title, .. } = event {
                    seen_clone.lock().unwrap().push(title);
                }
            })
            .unwrap();

        dispatcher.emit(TaskEvent::TaskAdded {
            id: "1".to_string(),
            title: "Buy milk".to_string(),
        });
        dispatcher.emit(TaskEvent::SyncStarted);

        assert_eq!(dispatcher.process_events().unwrap(), 2);
        assert_eq!(seen.lock().unwrap().as_slice(), ["Buy milk"]);

        // Nothing left in the queue.
        assert_eq!(dispatcher.process_events().unwrap(), 0);
    }

    #[test]
    fn test_processing_is_pinned_to_the_registration_thread() {
        let dispatcher = Arc::new(EventDispatcher::new());
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        dispatcher
            .register_callback(move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let dispatcher_clone = dispatcher.clone();
        let result = std::thread::spawn(move || dispatcher_clone.process_events())
            .join()
            .unwrap();
        assert!(result.is_err());

        dispatcher.emit(TaskEvent::SyncStarted);
        assert_eq!(dispatcher.process_events().unwrap(), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
