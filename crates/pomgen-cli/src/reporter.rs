//! Terminal rendering of generation notifications.

use pomgen_core::application::ports::{Notification, Notifications, Severity};
use tracing::warn;

use crate::output::OutputManager;

/// Progress to stdout, warnings and transformation errors to stderr.
pub struct TerminalReporter {
    output: OutputManager,
}

impl TerminalReporter {
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl Notifications for TerminalReporter {
    fn emit(&self, notification: Notification) {
        let line = notification.to_string();
        let written = match notification.severity() {
            Severity::Progress => self.output.print(&line),
            Severity::Warning => self.output.warning(&line),
            Severity::Error => self.output.error(&line),
        };
        if let Err(e) = written {
            warn!(error = %e, "Could not write notification");
        }
    }
}
