//! The collaborators every command executes against.

use std::sync::Arc;

use crate::application::ports::{Filesystem, KeyValueStoreFactory, Notification, Notifications};

/// Injected I/O surface for [`crate::application::Command::execute`].
///
/// Cheap to clone; the handles are shared and reused across commands.
#[derive(Clone)]
pub struct Environment {
    pub filesystem: Arc<dyn Filesystem>,
    pub stores: Arc<dyn KeyValueStoreFactory>,
    pub notifications: Arc<dyn Notifications>,
}

impl Environment {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        stores: Arc<dyn KeyValueStoreFactory>,
        notifications: Arc<dyn Notifications>,
    ) -> Self {
        Self {
            filesystem,
            stores,
            notifications,
        }
    }

    pub fn notify(&self, notification: Notification) {
        self.notifications.emit(notification);
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}
