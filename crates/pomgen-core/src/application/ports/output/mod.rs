//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `pomgen-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::{Coordinate, KeyPath, Project};
use crate::error::PomgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `pomgen_adapters::filesystem::LocalFilesystem` (production)
/// - `pomgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PomgenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> PomgenResult<()>;

    fn read_to_string(&self, path: &Path) -> PomgenResult<String>;

    /// Mark a file `rwxr-xr-x`. No-op where POSIX modes do not exist.
    fn set_permissions(&self, path: &Path, executable: bool) -> PomgenResult<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Every file below `root`, recursively, sorted by path.
    fn walk_files(&self, root: &Path) -> PomgenResult<Vec<PathBuf>>;
}

/// Port for remote release-version metadata.
///
/// Implemented by:
/// - `pomgen_adapters::http::MavenCentralLookup` (production)
/// - `crate::application::services::CachingVersionLookup` (memoizing decorator)
#[cfg_attr(test, mockall::automock)]
pub trait VersionLookup: Send + Sync {
    /// Latest release version of `group:artifact`.
    fn latest_release_version(&self, group: &str, artifact: &str) -> PomgenResult<String>;
}

/// Port for a path-addressed JSON document.
///
/// Setting a path through a missing or too-short list pads the skipped
/// slots; `store` pads with `null`, `store_padded` with the given value.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &KeyPath) -> PomgenResult<Value>;

    fn store(&self, key: &KeyPath, value: Value) -> PomgenResult<()>;

    fn store_padded(&self, key: &KeyPath, value: Value, padding: Value) -> PomgenResult<()>;

    fn exists(&self, key: &KeyPath) -> PomgenResult<bool>;

    /// Length of the list at `key`.
    fn array_size(&self, key: &KeyPath) -> PomgenResult<usize>;

    /// Value at `key`, or `default` without touching the document.
    fn load_or_default(&self, key: &KeyPath, default: Value) -> PomgenResult<Value> {
        if self.exists(key)? {
            self.load(key)
        } else {
            Ok(default)
        }
    }

    /// Value at `key`, storing `default` there first if absent.
    fn load_with_default(&self, key: &KeyPath, default: Value) -> PomgenResult<Value> {
        if !self.exists(key)? {
            self.store(key, default)?;
        }
        self.load(key)
    }
}

/// Opens a [`KeyValueStore`] backed by the document at a path.
pub trait KeyValueStoreFactory: Send + Sync {
    fn open(&self, path: &Path) -> PomgenResult<Box<dyn KeyValueStore>>;
}

/// Loads another project's specification, read-only.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectLoader: Send + Sync {
    fn load_project(&self, project_path: &Path) -> PomgenResult<Project>;
}

// ── Notifications ─────────────────────────────────────────────────────────────

/// Structured events emitted while generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    FileCreated(PathBuf),
    FileModified(PathBuf),
    FileUnchanged(PathBuf),
    DirectoryCreated(PathBuf),
    VersionResolved { uri: String, coordinate: Coordinate },
    SourceModulesNotFound(Vec<String>),
    TargetModulesNotFound(Vec<String>),
    DuplicateTargetModules(Vec<String>),
    PathNotDirectory(PathBuf),
    FileTransformationError {
        source_path: PathBuf,
        target_path: PathBuf,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Progress,
    Warning,
    Error,
}

impl Notification {
    pub fn severity(&self) -> Severity {
        match self {
            Self::FileCreated(_)
            | Self::FileModified(_)
            | Self::FileUnchanged(_)
            | Self::DirectoryCreated(_)
            | Self::VersionResolved { .. } => Severity::Progress,
            Self::SourceModulesNotFound(_)
            | Self::TargetModulesNotFound(_)
            | Self::DuplicateTargetModules(_)
            | Self::PathNotDirectory(_) => Severity::Warning,
            Self::FileTransformationError { .. } => Severity::Error,
        }
    }
}

fn bracketed(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileCreated(path) => write!(f, "created {}", path.display()),
            Self::FileModified(path) => write!(f, "modified {}", path.display()),
            Self::FileUnchanged(path) => write!(f, "unchanged {}", path.display()),
            Self::DirectoryCreated(path) => write!(f, "created-dir {}", path.display()),
            Self::VersionResolved { uri, coordinate } => write!(
                f,
                "group:{} artifact:{} version:{} uri:{}",
                coordinate.group, coordinate.artifact, coordinate.version, uri
            ),
            Self::SourceModulesNotFound(modules) => write!(
                f,
                "Warning: Source modules not found in source project: {}",
                bracketed(modules)
            ),
            Self::TargetModulesNotFound(modules) => write!(
                f,
                "Warning: Target modules not found in target project: {}",
                bracketed(modules)
            ),
            Self::DuplicateTargetModules(modules) => write!(
                f,
                "Warning: Multiple source modules mapping to same target module: {}",
                bracketed(modules)
            ),
            Self::PathNotDirectory(path) => write!(
                f,
                "Warning: Source module path is not a directory, skipping: {}",
                path.display()
            ),
            Self::FileTransformationError {
                source_path,
                target_path,
                message,
            } => write!(
                f,
                "Error copying and transforming file from {} to {}: {}",
                source_path.display(),
                target_path.display(),
                message
            ),
        }
    }
}

/// Observer for [`Notification`]s.
///
/// Implemented by:
/// - `pomgen_cli::reporter::TerminalReporter` (stdout / stderr lines)
/// - `pomgen_adapters::notifications::RecordingNotifications` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Notifications: Send + Sync {
    fn emit(&self, notification: Notification);
}
