//! Application services - orchestrate use cases.
//!
//! Builders turn a `Project` into markup trees, the generator turns those
//! into commands, and the runner loads a specification, generates and
//! executes in one go.

pub mod generator;
pub mod gradle;
pub mod helper_files;
pub mod maven;
pub mod runner;
pub mod source_import;
pub mod specification;
pub mod version_resolver;

pub use generator::{CODE_STRUCTURE_CONFIG, Generator};
pub use gradle::GradleScriptBuilder;
pub use helper_files::{ScriptContext, helper_file_commands};
pub use maven::MavenPomBuilder;
pub use runner::{ProjectRunner, RunSummary};
pub use source_import::{SourceImporter, build_transformations};
pub use specification::{DocumentedStore, SPECIFICATION_FILE, SpecificationLoader};
pub use version_resolver::{CachingVersionLookup, VersionResolver};
