//! Application layer for pomgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectRunner, Generator, builders)
//! - **Commands**: The side effects a run performs, as values
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod commands;
pub mod environment;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use commands::{Command, Outcome, SourceCopy};
pub use environment::Environment;
pub use error::ApplicationError;

// Re-export port traits (for adapter implementation)
pub use ports::{
    Filesystem, KeyValueStore, KeyValueStoreFactory, Notification, Notifications, ProjectLoader,
    Severity, VersionLookup,
};

pub use services::{ProjectRunner, RunSummary, SpecificationLoader};
