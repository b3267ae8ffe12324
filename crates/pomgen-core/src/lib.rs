//! pomgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the pomgen
//! Maven scaffolding generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           pomgen-cli (CLI)              │
//! │   (args, config, logging, reporting)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ProjectRunner, Generator, builders)   │
//! │   Specification → Commands → Execute    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, VersionLookup, Stores, …)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     pomgen-adapters (Infrastructure)    │
//! │ (LocalFilesystem, MavenCentralLookup,   │
//! │  JsonStoreFactory, …)                   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Project, classifier, markup, versions) │
//! │          No I/O, no logging             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//! use std::sync::Arc;
//! use pomgen_core::prelude::*;
//!
//! // Adapters come from pomgen-adapters.
//! let environment = Environment::new(filesystem, stores, notifications);
//! let runner = ProjectRunner::new(environment, Arc::new(lookup));
//! let summary = runner.run(Path::new("project-specification.json"), Path::new("."))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Command, Environment, Outcome, ProjectRunner, RunSummary, SpecificationLoader,
        ports::{
            Filesystem, KeyValueStore, KeyValueStoreFactory, Notification, Notifications,
            ProjectLoader, Severity, VersionLookup,
        },
    };
    pub use crate::domain::{DependencySpec, GradlePluginSpec, KeyPath, Project, SourceDependency};
    pub use crate::error::{PomgenError, PomgenResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
