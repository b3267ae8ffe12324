//! Application layer errors.
//!
//! These errors represent failures talking to the outside world (network,
//! filesystem, configuration store), not business rule violations.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Metadata fetch failed or returned a non-2xx status.
    #[error("Version lookup failed for {uri}: {reason}")]
    RemoteLookup { uri: String, reason: String },

    /// Metadata listed no version with purely numeric segments.
    #[error("No release version found for {group}:{artifact}")]
    NoReleaseVersionFound { group: String, artifact: String },

    /// Metadata could not be parsed, or a single-valued field repeated.
    #[error("Malformed metadata at {uri}: {reason}")]
    MalformedMetadata { uri: String, reason: String },

    /// A source dependency points at a missing path or a non-directory.
    #[error("Source project not found: {path}")]
    SourceProjectNotFound { path: PathBuf },

    /// A source project has no `project-specification.json`.
    #[error("Project specification not found: {path}")]
    SpecificationMissing { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A JSON configuration document could not be read or written.
    #[error("Configuration store error at {path}: {reason}")]
    ConfigStore { path: PathBuf, reason: String },

    /// Shared state lock poisoned.
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RemoteLookup { uri, .. } => vec![
                format!("Could not fetch: {}", uri),
                "Check your network connection or repository mirror".into(),
                "Or pin the version under \"versionOverrides\"".into(),
            ],
            Self::NoReleaseVersionFound { group, artifact } => vec![
                format!("Only pre-release versions exist for {}:{}", group, artifact),
                "Pin a version under \"versionOverrides\"".into(),
            ],
            Self::SourceProjectNotFound { path } => vec![
                format!("Check \"sourceProjectPath\": {}", path.display()),
                "Relative paths resolve against the base directory".into(),
            ],
            Self::SpecificationMissing { path } => vec![
                format!("Expected file: {}", path.display()),
                "Run pomgen in the source project first".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ConfigStore { path, .. } => vec![
                format!("Check that {} contains valid JSON", path.display()),
            ],
            Self::StoreLockError => vec![
                "Internal state is locked".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceProjectNotFound { .. } | Self::SpecificationMissing { .. } => {
                ErrorCategory::NotFound
            }
            Self::NoReleaseVersionFound { .. } => ErrorCategory::NotFound,
            Self::ConfigStore { .. } => ErrorCategory::Configuration,
            Self::RemoteLookup { .. }
            | Self::MalformedMetadata { .. }
            | Self::FilesystemError { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_project_is_not_found() {
        let err = ApplicationError::SourceProjectNotFound {
            path: PathBuf::from("../lib"),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("../lib"));
    }

    #[test]
    fn lookup_failure_suggests_override() {
        let err = ApplicationError::RemoteLookup {
            uri: "https://repo/x".into(),
            reason: "HTTP 404".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("versionOverrides")));
    }
}
