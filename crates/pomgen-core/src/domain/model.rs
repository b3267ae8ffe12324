//! The `Project` aggregate and the records hanging off it.
//!
//! A `Project` is the in-memory form of one `project-specification.json`.
//! Everything the generator emits is derived from it deterministically:
//!
//! - `groupId = join(prefix + name, ".")`
//! - `artifactId(module) = join(name + [module], "-")`
//! - package path of a module = `prefix + name + module.split('-')`
//!
//! # Domain purity
//!
//! No I/O and no logging here. Loading is the job of the specification
//! loader in the application layer.

use std::path::PathBuf;

use indexmap::IndexMap;

// ── Dependencies ──────────────────────────────────────────────────────────────

/// What an alias in the `dependencies` table points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySpec {
    /// A Maven artifact, version resolved remotely unless pinned.
    External {
        group: String,
        artifact: String,
        scope: Option<String>,
    },
    /// A sibling module; its version is always `${project.version}`.
    Internal { scope: Option<String> },
}

impl DependencySpec {
    pub fn external(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self::External {
            group: group.into(),
            artifact: artifact.into(),
            scope: None,
        }
    }

    pub fn internal() -> Self {
        Self::Internal { scope: None }
    }

    /// Same spec with `scope` set.
    pub fn scoped(self, scope: impl Into<String>) -> Self {
        let scope = Some(scope.into());
        match self {
            Self::External {
                group, artifact, ..
            } => Self::External {
                group,
                artifact,
                scope,
            },
            Self::Internal { .. } => Self::Internal { scope },
        }
    }

    pub fn scope(&self) -> Option<&str> {
        match self {
            Self::External { scope, .. } | Self::Internal { scope } => scope.as_deref(),
        }
    }
}

/// A (group, artifact) pair identifying a remote dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupArtifact {
    pub group: String,
    pub artifact: String,
}

impl GroupArtifact {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }
}

/// A pinned version from `versionOverrides`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct VersionOverride {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl VersionOverride {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }
}

/// A fully resolved Maven coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub scope: Option<String>,
}

// ── Project metadata ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Developer {
    pub name: String,
    pub github_name: String,
    pub maven_user_name: String,
    pub organization: String,
    pub url: String,
}

impl Default for Developer {
    fn default() -> Self {
        Self {
            name: "developer name".into(),
            github_name: "developer github name".into(),
            maven_user_name: "developer maven user name".into(),
            organization: "developer organization".into(),
            url: "developer url".into(),
        }
    }
}

/// Import of modules from another local project, copied as source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDependency {
    pub source_project_path: PathBuf,
    /// Source module name → target module name, in declaration order.
    pub module_mapping: IndexMap<String, String>,
}

/// A module published as a Gradle plugin instead of a plain Maven jar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradlePluginSpec {
    pub module: String,
    pub plugin_id: String,
    pub implementation_class: String,
    pub display_name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub vcs_url: Option<String>,
}

// ── Aggregate root ────────────────────────────────────────────────────────────

/// The declarative project model.
///
/// Map-valued fields use `IndexMap` because their insertion order is the
/// order of `<modules>`, `<dependencyManagement>` and generated commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub prefix: Vec<String>,
    pub name: Vec<String>,
    pub description: String,
    pub version: String,
    pub language: String,
    pub developer: Developer,
    pub dependencies: IndexMap<String, DependencySpec>,
    pub version_overrides: Vec<VersionOverride>,
    pub global: Vec<String>,
    pub modules: IndexMap<String, Vec<String>>,
    pub java_version: String,
    pub entry_points: IndexMap<String, String>,
    pub source_dependencies: Vec<SourceDependency>,
    pub maven_plugin: Vec<String>,
    pub gradle_plugin: Vec<GradlePluginSpec>,
    pub exports: Vec<String>,
    pub deployable: bool,
}

pub const DEFAULT_LANGUAGE: &str = "kotlin";
pub const DEFAULT_JAVA_VERSION: &str = "25";

impl Project {
    /// A project with every optional field at its documented default.
    pub fn new<P, N, S>(prefix: P, name: N) -> Self
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefix: prefix.into_iter().map(Into::into).collect(),
            name: name.into_iter().map(Into::into).collect(),
            description: "project description".into(),
            version: "project version".into(),
            language: DEFAULT_LANGUAGE.into(),
            developer: Developer::default(),
            dependencies: IndexMap::new(),
            version_overrides: Vec::new(),
            global: Vec::new(),
            modules: IndexMap::new(),
            java_version: DEFAULT_JAVA_VERSION.into(),
            entry_points: IndexMap::new(),
            source_dependencies: Vec::new(),
            maven_plugin: Vec::new(),
            gradle_plugin: Vec::new(),
            exports: Vec::new(),
            deployable: true,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_developer(mut self, developer: Developer) -> Self {
        self.developer = developer;
        self
    }

    pub fn with_module<I, S>(mut self, module: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules.insert(
            module.into(),
            dependencies.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_dependency(mut self, alias: impl Into<String>, spec: DependencySpec) -> Self {
        self.dependencies.insert(alias.into(), spec);
        self
    }

    pub fn with_global(mut self, alias: impl Into<String>) -> Self {
        self.global.push(alias.into());
        self
    }

    pub fn with_version_override(mut self, pin: VersionOverride) -> Self {
        self.version_overrides.push(pin);
        self
    }

    pub fn with_entry_point(mut self, module: impl Into<String>, main_class: impl Into<String>) -> Self {
        self.entry_points.insert(module.into(), main_class.into());
        self
    }

    pub fn with_maven_plugin(mut self, module: impl Into<String>) -> Self {
        self.maven_plugin.push(module.into());
        self
    }

    pub fn with_gradle_plugin(mut self, spec: GradlePluginSpec) -> Self {
        self.gradle_plugin.push(spec);
        self
    }

    pub fn with_source_dependency(mut self, dependency: SourceDependency) -> Self {
        self.source_dependencies.push(dependency);
        self
    }

    pub fn with_export(mut self, module: impl Into<String>) -> Self {
        self.exports.push(module.into());
        self
    }

    pub fn with_deployable(mut self, deployable: bool) -> Self {
        self.deployable = deployable;
        self
    }

    // ── Derived coordinates ───────────────────────────────────────────────────

    pub fn group_id(&self) -> String {
        self.prefix
            .iter()
            .chain(&self.name)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// `name` words plus `suffix`, joined with `-`.
    pub fn artifact_id(&self, suffix: &str) -> String {
        self.name
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(suffix))
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn parent_artifact_id(&self) -> String {
        self.artifact_id("parent")
    }

    pub fn repository_name(&self) -> String {
        self.name.join("-")
    }

    pub fn github_url(&self) -> String {
        format!(
            "https://github.com/{}/{}",
            self.developer.github_name,
            self.repository_name()
        )
    }

    /// Package segments of `module`: `prefix + name + module.split('-')`.
    pub fn package_segments(&self, module: &str) -> Vec<String> {
        self.prefix
            .iter()
            .chain(&self.name)
            .cloned()
            .chain(module_name_parts(module))
            .collect()
    }

    pub fn version_override(&self, group: &str, artifact: &str) -> Option<&str> {
        self.version_overrides
            .iter()
            .find(|pin| pin.group == group && pin.artifact == artifact)
            .map(|pin| pin.version.as_str())
    }

    pub fn is_maven_plugin(&self, module: &str) -> bool {
        self.maven_plugin.iter().any(|m| m == module)
    }

    pub fn gradle_plugin_for(&self, module: &str) -> Option<&GradlePluginSpec> {
        self.gradle_plugin.iter().find(|spec| spec.module == module)
    }

    /// Modules listed in the root `<modules>`: declared modules, then any
    /// Gradle plugin module not already declared.
    pub fn aggregated_modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        for spec in &self.gradle_plugin {
            if !modules.contains(&spec.module.as_str()) {
                modules.push(&spec.module);
            }
        }
        modules
    }
}

/// Words of a module name, split on `-`.
pub fn module_name_parts(module: &str) -> impl Iterator<Item = String> + '_ {
    module.split('-').map(str::to_string)
}
