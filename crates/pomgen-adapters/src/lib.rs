//! Infrastructure adapters for pomgen.
//!
//! This crate implements the ports defined in `pomgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod config_store;
pub mod filesystem;
pub mod http;
pub mod notifications;

// Re-export commonly used adapters
pub use config_store::{JsonFileStore, JsonStoreFactory};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use http::{MAVEN_CENTRAL, MavenCentralLookup};
pub use notifications::RecordingNotifications;
