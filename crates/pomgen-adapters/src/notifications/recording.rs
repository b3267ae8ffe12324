//! Collects notifications in memory for assertions.

use std::sync::{Arc, Mutex};

use pomgen_core::application::ports::{Notification, Notifications, Severity};

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifications {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, in order.
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter(|event| event.severity() == severity)
            .collect()
    }

    /// Rendered lines, as a terminal would show them.
    pub fn lines(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl Notifications for RecordingNotifications {
    fn emit(&self, notification: Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(notification);
        }
    }
}
