//! Consistency checks for a source dependency's module mapping.

use indexmap::IndexMap;

use crate::domain::{error::DomainError, model::Project};

/// Non-fatal findings. Each list is in mapping declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingReport {
    /// Mapped source modules the source project does not declare.
    pub missing_source_modules: Vec<String>,
    /// Mapped target modules this project does not declare.
    pub missing_target_modules: Vec<String>,
    /// Target modules that more than one source module maps onto.
    pub duplicate_targets: Vec<String>,
}

impl MappingReport {
    pub fn is_clean(&self) -> bool {
        self.missing_source_modules.is_empty()
            && self.missing_target_modules.is_empty()
            && self.duplicate_targets.is_empty()
    }
}

/// Importing a module the source project does not export is fatal; every
/// other inconsistency is reported and the import goes ahead.
pub fn validate_module_mapping(
    source: &Project,
    target: &Project,
    mapping: &IndexMap<String, String>,
) -> Result<MappingReport, DomainError> {
    let non_exported: Vec<String> = mapping
        .keys()
        .filter(|module| !source.exports.contains(module))
        .cloned()
        .collect();
    if !non_exported.is_empty() {
        return Err(DomainError::NonExportedModules {
            source_project: source.group_id(),
            modules: non_exported,
            available: source.exports.clone(),
        });
    }

    let missing_source_modules = mapping
        .keys()
        .filter(|module| !source.modules.contains_key(module.as_str()))
        .cloned()
        .collect();

    let missing_target_modules = mapping
        .values()
        .filter(|module| !target.modules.contains_key(module.as_str()))
        .cloned()
        .collect();

    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for target_module in mapping.values() {
        *counts.entry(target_module.as_str()).or_default() += 1;
    }
    let duplicate_targets = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(module, _)| module.to_string())
        .collect();

    Ok(MappingReport {
        missing_source_modules,
        missing_target_modules,
        duplicate_targets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Project {
        Project::new(["com", "lib"], ["shared"])
            .with_module("core", Vec::<String>::new())
            .with_module("util", Vec::<String>::new())
            .with_export("core")
            .with_export("util")
            .with_export("ghost")
    }

    fn target() -> Project {
        Project::new(["com", "app"], ["main"]).with_module("imported", Vec::<String>::new())
    }

    fn mapping(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(s, t)| (s.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn clean_mapping_has_no_findings() {
        let report = validate_module_mapping(&source(), &target(), &mapping(&[("core", "imported")])).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn non_exported_modules_are_fatal() {
        let source = Project::new(["com", "lib"], ["shared"])
            .with_module("core", Vec::<String>::new())
            .with_export("api");
        let err = validate_module_mapping(&source, &target(), &mapping(&[("core", "imported")])).unwrap_err();
        assert_eq!(
            err,
            DomainError::NonExportedModules {
                source_project: "com.lib.shared".into(),
                modules: vec!["core".into()],
                available: vec!["api".into()],
            }
        );
    }

    #[test]
    fn missing_source_module_is_reported_alone() {
        let report = validate_module_mapping(
            &source(),
            &target(),
            &mapping(&[("core", "imported"), ("ghost", "other")]),
        )
        .unwrap();
        assert_eq!(report.missing_source_modules, vec!["ghost"]);
        assert_eq!(report.missing_target_modules, vec!["other"]);
    }

    #[test]
    fn duplicate_targets_are_listed_once() {
        let report = validate_module_mapping(
            &source(),
            &target(),
            &mapping(&[("core", "imported"), ("util", "imported")]),
        )
        .unwrap();
        assert_eq!(report.duplicate_targets, vec!["imported"]);
    }
}
