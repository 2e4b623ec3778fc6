use std::sync::{Arc, Mutex};

use quill_notify::{DispatchError, Notification, Notifier};

/// Rejects every notification, like a queue whose worker is gone.
#[derive(Clone, Copy, Default)]
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn enqueue(&self, _notification: Notification) -> Result<(), DispatchError> {
        Err(DispatchError::Closed)
    }
}

/// Accepts and keeps every notification without delivering anything.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    queued: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queued(&self) -> Vec<Notification> {
        self.queued.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn enqueue(&self, notification: Notification) -> Result<(), DispatchError> {
        self.queued.lock().unwrap().push(notification);
        Ok(())
    }
}
