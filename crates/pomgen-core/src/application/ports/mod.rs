//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `pomgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `VersionLookup`: Remote release-version metadata
//!   - `KeyValueStore` / `KeyValueStoreFactory`: JSON documents
//!   - `ProjectLoader`: Foreign project specifications
//!   - `Notifications`: Progress and warning events
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Filesystem, KeyValueStore, KeyValueStoreFactory, Notification, Notifications, ProjectLoader,
    Severity, VersionLookup,
};

#[cfg(test)]
pub use output::{MockFilesystem, MockNotifications, MockProjectLoader, MockVersionLookup};
