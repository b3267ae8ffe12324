//! Notification sinks.

mod recording;

pub use recording::RecordingNotifications;
