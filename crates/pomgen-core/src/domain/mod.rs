//! Core domain layer for pomgen.
//!
//! Pure logic only: the project model, dependency classification, release
//! version rules, JSON document paths, the generic markup trees with their
//! renderer, package transformations and module-mapping checks.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: no filesystem, network or logging
//! - **Immutable values**: everything is Clone + PartialEq
//! - **Deterministic**: same `Project` in, same trees and lines out

pub mod classifier;
pub mod document;
pub mod error;
pub mod key_path;
pub mod mapping;
pub mod markup;
pub mod model;
pub mod transform;
pub mod version;

pub use classifier::{Classification, classify, classify_global};
pub use error::{DomainError, ErrorCategory};
pub use key_path::{Key, KeyPath};
pub use mapping::{MappingReport, validate_module_mapping};
pub use markup::{DslNode, Layout, Markup, MarkupRenderer, XmlNode, quote};
pub use model::{
    Coordinate, DependencySpec, Developer, GradlePluginSpec, GroupArtifact, Project,
    SourceDependency, VersionOverride, module_name_parts,
};
pub use transform::{PackageTransformation, rewrite_source};
pub use version::{compare_versions, is_release_version, latest_release};
