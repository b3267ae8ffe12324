// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through command results and notifications)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Dependency resolution
    // ========================================================================
    #[error("Dependency '{reference}' not found in dependencies or modules")]
    UnresolvedDependency { reference: String },

    #[error("Global dependency '{name}' not found in dependencies section")]
    GlobalDependencyNotFound { name: String },

    #[error(
        "Global dependency '{name}' cannot be an internal module. \
         Internal dependencies should be declared per-module in the modules section."
    )]
    InternalGlobalDependency { name: String },

    #[error("Expected external dependency but found internal module '{name}'")]
    ExpectedExternal { name: String },

    // ========================================================================
    // Build configuration
    // ========================================================================
    #[error("Unsupported language '{language}'")]
    UnsupportedLanguage { language: String },

    // ========================================================================
    // Source imports
    // ========================================================================
    #[error(
        "Cannot import non-exported modules from source project: {source_project}\n\n\
         Non-exported modules: {}\n\
         Available exports: {}\n\n\
         Resolution:\n  \
         1. Remove these modules from your moduleMapping, OR\n  \
         2. Add them to the \"exports\" section in {source_project}'s project-specification.json\n\n\
         Note: Modules must be explicitly marked as exportable for other projects to import them.",
        join_list(.modules),
        join_or_none(.available)
    )]
    NonExportedModules {
        source_project: String,
        modules: Vec<String>,
        available: Vec<String>,
    },

    // ========================================================================
    // Specification shape
    // ========================================================================
    #[error("Invalid key path '{path}': {reason}")]
    InvalidKeyPath { path: String, reason: String },

    #[error("Invalid specification value at '{path}': {reason}")]
    InvalidSpecification { path: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnresolvedDependency { reference } => vec![
                format!("Add '{}' to the \"dependencies\" section", reference),
                format!("Or declare a module named '{}' in \"modules\"", reference),
            ],
            Self::GlobalDependencyNotFound { name } => vec![
                format!("Declare '{}' under \"dependencies\" with a group and artifact", name),
                "Or remove it from \"global\"".into(),
            ],
            Self::InternalGlobalDependency { name } => vec![
                format!("Remove '{}' from \"global\"", name),
                "List internal modules in each module's dependency list instead".into(),
            ],
            Self::UnsupportedLanguage { language } => vec![
                format!("'{}' has no compiler plugin registered", language),
                "Supported languages:".into(),
                "  • kotlin".into(),
                "  • scala".into(),
            ],
            Self::NonExportedModules { source_project, .. } => vec![
                "Remove the modules from \"moduleMapping\"".into(),
                format!("Or add them to \"exports\" in {}", source_project),
            ],
            Self::InvalidSpecification { path, .. } => vec![
                format!("Check the value stored at '{}'", path),
                "Delete the key to fall back to its default".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnresolvedDependency { .. } | Self::GlobalDependencyNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::InternalGlobalDependency { .. }
            | Self::ExpectedExternal { .. }
            | Self::UnsupportedLanguage { .. }
            | Self::NonExportedModules { .. }
            | Self::InvalidSpecification { .. } => ErrorCategory::Validation,
            Self::InvalidKeyPath { .. } => ErrorCategory::Internal,
        }
    }
}

fn join_list(items: &[String]) -> String {
    items.join(", ")
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_exported_message_lists_modules_and_exports() {
        let err = DomainError::NonExportedModules {
            source_project: "com.example.lib".into(),
            modules: vec!["core".into(), "util".into()],
            available: vec!["api".into()],
        };
        let message = err.to_string();
        assert!(message.contains("com.example.lib"));
        assert!(message.contains("Non-exported modules: core, util"));
        assert!(message.contains("Available exports: api"));
    }

    #[test]
    fn non_exported_message_says_none_without_exports() {
        let err = DomainError::NonExportedModules {
            source_project: "com.example.lib".into(),
            modules: vec!["core".into()],
            available: vec![],
        };
        assert!(err.to_string().contains("Available exports: none"));
    }

    #[test]
    fn unresolved_dependency_is_not_found() {
        let err = DomainError::UnresolvedDependency {
            reference: "ghost".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("ghost")));
    }
}
