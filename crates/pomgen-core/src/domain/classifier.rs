//! Resolution of dependency references inside a module's dependency list.
//!
//! Precedence: the `dependencies` table is consulted first and its tag
//! decides; a bare module name is only used when no alias matches.

use crate::domain::{
    error::DomainError,
    model::{DependencySpec, Project},
};

/// Outcome of classifying one reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    External {
        group: &'a str,
        artifact: &'a str,
        scope: Option<&'a str>,
    },
    Internal {
        module: &'a str,
        scope: Option<&'a str>,
    },
}

impl Classification<'_> {
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

pub fn classify<'a>(project: &'a Project, reference: &'a str) -> Result<Classification<'a>, DomainError> {
    if let Some(spec) = project.dependencies.get(reference) {
        return Ok(match spec {
            DependencySpec::External {
                group,
                artifact,
                scope,
            } => Classification::External {
                group: group.as_str(),
                artifact: artifact.as_str(),
                scope: scope.as_deref(),
            },
            DependencySpec::Internal { scope } => Classification::Internal {
                module: reference,
                scope: scope.as_deref(),
            },
        });
    }

    if project.modules.contains_key(reference) {
        return Ok(Classification::Internal {
            module: reference,
            scope: None,
        });
    }

    Err(DomainError::UnresolvedDependency {
        reference: reference.to_string(),
    })
}

/// Resolve an alias listed under `global`. Globals must be external.
pub fn classify_global<'a>(project: &'a Project, alias: &str) -> Result<(&'a str, &'a str), DomainError> {
    match project.dependencies.get(alias) {
        Some(DependencySpec::External { group, artifact, .. }) => {
            Ok((group.as_str(), artifact.as_str()))
        }
        Some(DependencySpec::Internal { .. }) => Err(DomainError::InternalGlobalDependency {
            name: alias.to_string(),
        }),
        None => Err(DomainError::GlobalDependencyNotFound {
            name: alias.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::new(["com", "example"], ["widget"])
            .with_module("core", Vec::<String>::new())
            .with_module("api", ["core", "json", "shared"])
            .with_module("shared", Vec::<String>::new())
            .with_dependency("json", DependencySpec::external("org.json", "json"))
            .with_dependency("shared", DependencySpec::internal().scoped("test"))
    }

    #[test]
    fn external_alias_resolves_to_coordinates() {
        let project = project();
        let result = classify(&project, "json").unwrap();
        assert_eq!(
            result,
            Classification::External {
                group: "org.json",
                artifact: "json",
                scope: None
            }
        );
    }

    #[test]
    fn bare_module_name_is_internal() {
        let project = project();
        let result = classify(&project, "core").unwrap();
        assert_eq!(
            result,
            Classification::Internal {
                module: "core",
                scope: None
            }
        );
    }

    #[test]
    fn explicit_tag_wins_over_module_table() {
        let project = project();
        let result = classify(&project, "shared").unwrap();
        assert_eq!(
            result,
            Classification::Internal {
                module: "shared",
                scope: Some("test")
            }
        );
    }

    #[test]
    fn unknown_reference_is_fatal() {
        let project = project();
        let err = classify(&project, "ghost").unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedDependency {
                reference: "ghost".into()
            }
        );
    }

    #[test]
    fn every_reference_in_every_module_classifies_or_fails() {
        let project = project().with_module("broken", ["nowhere"]);
        for (module, references) in &project.modules {
            for reference in references {
                let result = classify(&project, reference);
                if module == "broken" {
                    assert!(result.is_err());
                } else {
                    assert!(result.is_ok());
                }
            }
        }
    }

    #[test]
    fn globals_must_be_external() {
        let project = project();
        assert_eq!(classify_global(&project, "json").unwrap(), ("org.json", "json"));
        assert!(matches!(
            classify_global(&project, "shared"),
            Err(DomainError::InternalGlobalDependency { .. })
        ));
        assert!(matches!(
            classify_global(&project, "missing"),
            Err(DomainError::GlobalDependencyNotFound { .. })
        ));
    }
}
